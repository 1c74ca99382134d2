//! Source location tracking for sort expressions
//!
//! Sort expressions are a single line of user input, so locations are
//! character offsets into that line. Offsets count `char`s rather than bytes
//! so that messages line up with what the user typed.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in the expression as a 0-based character offset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    pub offset: usize,
}

impl Position {
    pub fn new(offset: usize) -> Self {
        Self { offset }
    }

    /// 1-based column, as shown to users
    pub fn column(&self) -> usize {
        self.offset + 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column {}", self.column())
    }
}

/// A half-open range of characters in the expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.offset <= end.offset,
            "Span start must not be after end"
        );
        Self { start, end }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Span covering exactly one character
    pub fn single(offset: usize) -> Self {
        Self {
            start: Position::new(offset),
            end: Position::new(offset + 1),
        }
    }

    pub fn from_offsets(start: usize, end: usize) -> Self {
        Self::new(Position::new(start), Position::new(end))
    }

    /// Merge two spans into one covering both
    pub fn merge(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// Characters of `input` covered by this span
    pub fn slice(&self, input: &str) -> String {
        input
            .chars()
            .skip(self.start.offset)
            .take(self.len())
            .collect()
    }

    /// Span for synthesized tokens that have no source text
    pub fn dummy() -> Self {
        Self::default()
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.len() <= 1 {
            write!(f, "{}", self.start)
        } else {
            write!(f, "columns {}-{}", self.start.column(), self.end.offset)
        }
    }
}

/// Optional location suffix for user-facing messages.
///
/// Displays as ` at column N` when present and as nothing otherwise, so an
/// error template can end with `{location}` regardless of whether positions
/// are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location(pub Option<Span>);

impl Location {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn span(&self) -> Option<Span> {
        self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(span) => write!(f, " at {}", span),
            None => Ok(()),
        }
    }
}

/// A value paired with the span it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Spanned<U> {
        Spanned {
            node: f(self.node),
            span: self.span,
        }
    }
}
