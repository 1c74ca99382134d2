//! Errors raised while converting infix tokens to postfix order

use crate::logging::{codes, Code};
use crate::utils::{Location, Span};

pub type SyntaxResult<T> = Result<T, SyntaxError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntaxError {
    #[error("Sort expression is empty")]
    EmptyExpression,

    #[error("'(' cannot directly follow a value or ')'{location}, use '*' to multiply")]
    MisplacedOpenBracket { location: Location },

    #[error("')' cannot directly follow an operator or '('{location}")]
    MisplacedCloseBracket { location: Location },

    #[error(
        "'{operator}' cannot start an expression or follow '(' or another operator{location}"
    )]
    MisplacedOperator { operator: char, location: Location },

    #[error("Expression cannot end with an operator{location}")]
    TrailingOperator { location: Location },

    #[error("Brackets are not balanced{location}")]
    UnbalancedBrackets { location: Location },

    #[error("Missing operator before {found}{location}")]
    MissingOperator { found: String, location: Location },
}

impl SyntaxError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::EmptyExpression => codes::syntax::EMPTY_EXPRESSION,
            Self::MisplacedOpenBracket { .. } => codes::syntax::MISPLACED_OPEN_BRACKET,
            Self::MisplacedCloseBracket { .. } => codes::syntax::MISPLACED_CLOSE_BRACKET,
            Self::MisplacedOperator { .. } => codes::syntax::MISPLACED_OPERATOR,
            Self::TrailingOperator { .. } => codes::syntax::TRAILING_OPERATOR,
            Self::UnbalancedBrackets { .. } => codes::syntax::UNBALANCED_BRACKETS,
            Self::MissingOperator { .. } => codes::syntax::MISSING_OPERATOR,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::EmptyExpression => None,
            Self::MisplacedOpenBracket { location }
            | Self::MisplacedCloseBracket { location }
            | Self::MisplacedOperator { location, .. }
            | Self::TrailingOperator { location }
            | Self::UnbalancedBrackets { location }
            | Self::MissingOperator { location, .. } => location.span(),
        }
    }
}
