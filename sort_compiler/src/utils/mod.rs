//! Shared location types used by the lexer, parser and error reporting.

pub mod span;

pub use span::{Location, Position, Span, Spanned};
