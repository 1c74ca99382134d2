//! Token stream produced by the lexical analyzer
//!
//! Besides the spanned tokens, the stream carries the canonical compact
//! source of the expression and the operator budget consumed so far.

use crate::{
    tokens::token::{Operator, Token},
    utils::{Span, Spanned},
};

/// A token with span information
pub type SpannedToken = Spanned<Token>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<SpannedToken>,
    canonical: String,
    operator_count: usize,
}

impl TokenStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a stream from bare tokens, deriving the canonical form from them
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        let mut stream = Self::new();
        for (index, token) in tokens.into_iter().enumerate() {
            let lexeme = token.to_string();
            stream.push_with_lexeme(token, Span::single(index), &lexeme);
        }
        stream
    }

    /// Append a token whose canonical lexeme is its display form
    pub fn push(&mut self, token: Token, span: Span) {
        let lexeme = token.to_string();
        self.push_with_lexeme(token, span, &lexeme);
    }

    /// Append a token, writing `lexeme` into the canonical source
    pub fn push_with_lexeme(&mut self, token: Token, span: Span, lexeme: &str) {
        if token.is_operator() {
            self.operator_count += 1;
        }
        self.canonical.push_str(lexeme);
        self.tokens.push(Spanned::new(token, span));
    }

    /// Append an expansion that is written as a single name in the canonical source
    pub fn push_expansion(&mut self, tokens: &[Token], span: Span, lexeme: &str) {
        for token in tokens {
            if token.is_operator() {
                self.operator_count += 1;
            }
            self.tokens.push(Spanned::new(token.clone(), span));
        }
        self.canonical.push_str(lexeme);
    }

    pub fn tokens(&self) -> &[SpannedToken] {
        &self.tokens
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpannedToken> {
        self.tokens.iter()
    }

    /// Token values without spans
    pub fn values(&self) -> Vec<Token> {
        self.tokens.iter().map(|t| t.node.clone()).collect()
    }

    /// Compact canonical source: canonical names, macros unexpanded, no whitespace
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Operators after macro expansion
    pub fn operator_count(&self) -> usize {
        self.operator_count
    }

    pub fn operand_count(&self) -> usize {
        self.tokens
            .iter()
            .filter(|t| matches!(t.node, Token::Operand(_)))
            .count()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Span of the final token, used for errors at end of input
    pub fn last_span(&self) -> Option<Span> {
        self.tokens.last().map(|t| t.span)
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a SpannedToken;
    type IntoIter = std::slice::Iter<'a, SpannedToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
