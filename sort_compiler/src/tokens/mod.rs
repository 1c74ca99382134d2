//! Token system for sort expressions
//!
//! - [`Token`] covers numbers, operators, brackets and stat names
//! - [`Operator`] carries precedence, arity and the aggregation operator name
//! - [`TokenStream`] is the lexer output: spanned tokens plus the canonical
//!   compact source and the operator budget consumed

pub mod token;
pub mod token_stream;

pub use token::{Operator, Token};
pub use token_stream::{SpannedToken, TokenStream};

pub use crate::utils::{Span, Spanned};
