//! Postfix evaluation shared by both renderers
//!
//! A renderer implements [`PostfixBackend`] for its value type; [`evaluate`]
//! drives it over the postfix stream with an explicit stack.

use super::error::{CodegenError, CodegenResult};
use crate::tokens::{Operator, Token};

/// Array-backed evaluation stack
#[derive(Debug)]
pub struct EvaluationStack<T> {
    items: Vec<T>,
}

impl<T> EvaluationStack<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, value: T) {
        self.items.push(value);
    }

    /// Pop for `operator`; an empty stack is an internal error
    pub fn pop(&mut self, operator: Operator) -> CodegenResult<T> {
        self.items.pop().ok_or(CodegenError::StackUnderflow {
            operator: operator.symbol(),
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The single remaining value once the stream is consumed
    pub fn into_single(mut self) -> CodegenResult<T> {
        if self.items.len() != 1 {
            return Err(CodegenError::UnreducedStack {
                remaining: self.items.len(),
            });
        }
        self.items.pop().ok_or(CodegenError::UnreducedStack { remaining: 0 })
    }
}

/// Value constructors for one code generation target
pub trait PostfixBackend {
    type Value;

    fn number(&self, value: f64) -> Self::Value;

    fn operand(&self, name: &str) -> Self::Value;

    fn unary(&self, operator: Operator, operand: Self::Value) -> CodegenResult<Self::Value>;

    fn binary(
        &self,
        operator: Operator,
        lhs: Self::Value,
        rhs: Self::Value,
    ) -> CodegenResult<Self::Value>;
}

/// Reduce a postfix stream to one value
pub fn evaluate<B: PostfixBackend>(backend: &B, postfix: &[Token]) -> CodegenResult<B::Value> {
    let mut stack = EvaluationStack::with_capacity(postfix.len());

    for token in postfix {
        match token {
            Token::Number(value) => stack.push(backend.number(*value)),
            Token::Operand(name) => stack.push(backend.operand(name)),
            Token::Operator(op) if op.is_unary() => {
                let operand = stack.pop(*op)?;
                stack.push(backend.unary(*op, operand)?);
            }
            Token::Operator(op) => {
                let rhs = stack.pop(*op)?;
                let lhs = stack.pop(*op)?;
                stack.push(backend.binary(*op, lhs, rhs)?);
            }
            Token::OpenBracket | Token::CloseBracket => {
                return Err(CodegenError::MalformedPostfix {
                    token: token.describe(),
                })
            }
        }
    }

    stack.into_single()
}
