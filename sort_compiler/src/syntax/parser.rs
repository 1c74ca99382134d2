//! Shunting-yard conversion from infix tokens to postfix order
//!
//! Unary operators are recognised by position: at the start, after `(` and
//! after another operator. Unary `+` is dropped and unary `-` becomes
//! [`Operator::Negate`]. Binary operators pop while the operator on the stack
//! binds at least as tightly, which makes them left-associative.

use super::error::{SyntaxError, SyntaxResult};
use crate::tokens::{Operator, Token, TokenStream};
use crate::utils::{Location, Span};

/// What the previous significant token was
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Previous {
    Start,
    Value,
    Operator,
    OpenBracket,
    CloseBracket,
}

impl Previous {
    /// Positions where an operand is required next
    fn expects_operand(self) -> bool {
        matches!(self, Self::Start | Self::Operator | Self::OpenBracket)
    }
}

#[derive(Debug, Clone, Copy)]
enum StackEntry {
    Operator(Operator),
    OpenBracket,
}

pub struct PostfixParser {
    include_positions: bool,
}

impl PostfixParser {
    pub fn new() -> Self {
        Self {
            include_positions: true,
        }
    }

    pub fn with_positions(include_positions: bool) -> Self {
        Self { include_positions }
    }

    fn location(&self, span: Span) -> Location {
        if self.include_positions {
            Location(Some(span))
        } else {
            Location::none()
        }
    }

    /// Convert the token stream to postfix order
    pub fn to_postfix(&self, stream: &TokenStream) -> SyntaxResult<Vec<Token>> {
        let mut output = Vec::with_capacity(stream.len());
        let mut stack: Vec<(StackEntry, Span)> = Vec::new();
        let mut previous = Previous::Start;

        for spanned in stream {
            let span = spanned.span;

            match &spanned.node {
                token @ (Token::Number(_) | Token::Operand(_)) => {
                    if !previous.expects_operand() {
                        return Err(SyntaxError::MissingOperator {
                            found: token.describe(),
                            location: self.location(span),
                        });
                    }
                    output.push(token.clone());
                    previous = Previous::Value;
                }

                Token::OpenBracket => {
                    if !previous.expects_operand() {
                        return Err(SyntaxError::MisplacedOpenBracket {
                            location: self.location(span),
                        });
                    }
                    stack.push((StackEntry::OpenBracket, span));
                    previous = Previous::OpenBracket;
                }

                Token::CloseBracket => {
                    if previous.expects_operand() {
                        return Err(SyntaxError::MisplacedCloseBracket {
                            location: self.location(span),
                        });
                    }
                    self.close_bracket(&mut stack, &mut output, span)?;
                    previous = Previous::CloseBracket;
                }

                Token::Operator(op) => {
                    if previous.expects_operand() {
                        match op {
                            Operator::Add => {}
                            Operator::Subtract | Operator::Negate => {
                                stack.push((StackEntry::Operator(Operator::Negate), span));
                            }
                            _ => {
                                return Err(SyntaxError::MisplacedOperator {
                                    operator: op.symbol(),
                                    location: self.location(span),
                                })
                            }
                        }
                    } else {
                        pop_binding_operators(&mut stack, &mut output, *op);
                        stack.push((StackEntry::Operator(*op), span));
                    }
                    previous = Previous::Operator;
                }
            }
        }

        match previous {
            Previous::Start => return Err(SyntaxError::EmptyExpression),
            Previous::Operator => {
                return Err(SyntaxError::TrailingOperator {
                    location: self.location(stream.last_span().unwrap_or_default()),
                })
            }
            _ => {}
        }

        while let Some((entry, span)) = stack.pop() {
            match entry {
                StackEntry::Operator(op) => output.push(Token::Operator(op)),
                StackEntry::OpenBracket => {
                    return Err(SyntaxError::UnbalancedBrackets {
                        location: self.location(span),
                    })
                }
            }
        }

        Ok(output)
    }

    fn close_bracket(
        &self,
        stack: &mut Vec<(StackEntry, Span)>,
        output: &mut Vec<Token>,
        span: Span,
    ) -> SyntaxResult<()> {
        while let Some((entry, _)) = stack.pop() {
            match entry {
                StackEntry::OpenBracket => return Ok(()),
                StackEntry::Operator(op) => output.push(Token::Operator(op)),
            }
        }

        Err(SyntaxError::UnbalancedBrackets {
            location: self.location(span),
        })
    }
}

impl Default for PostfixParser {
    fn default() -> Self {
        Self::new()
    }
}

fn pop_binding_operators(
    stack: &mut Vec<(StackEntry, Span)>,
    output: &mut Vec<Token>,
    incoming: Operator,
) {
    while let Some((StackEntry::Operator(top), _)) = stack.last() {
        if top.precedence() < incoming.precedence() {
            break;
        }
        output.push(Token::Operator(*top));
        stack.pop();
    }
}
