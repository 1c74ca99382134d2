use crate::codegen::CodegenError;
use crate::config::compile_time::errors::{MAX_ECHO_LENGTH, MIN_ECHO_LENGTH};
use crate::lexical::LexerError;
use crate::logging::Code;
use crate::syntax::SyntaxError;

/// Failure of a single pipeline stage
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StageError {
    #[error(transparent)]
    Lexical(#[from] LexerError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

impl StageError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::Lexical(e) => e.error_code(),
            Self::Syntax(e) => e.error_code(),
            Self::Codegen(e) => e.error_code(),
        }
    }

    pub fn is_internal(&self) -> bool {
        match self {
            Self::Codegen(e) => e.is_internal(),
            Self::Lexical(_) | Self::Syntax(_) => false,
        }
    }
}

/// Errors returned to callers of the sort expression parser
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SortExpressionError {
    /// The user's expression is wrong; the message is safe to show them
    #[error("{message}")]
    InvalidExpression { message: String },

    /// The compiler itself failed
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl SortExpressionError {
    /// Build the user-facing error for `stage`, echoing `input` when useful
    pub fn invalid(stage: &StageError, input: &str) -> Self {
        let message = match echo_input(input) {
            Some(echo) => format!("{}\n\nExpression: {}", stage, echo),
            None => stage.to_string(),
        };
        Self::InvalidExpression { message }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidExpression { message } | Self::Internal { message } => message,
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }
}

/// Input truncated for echoing, or `None` when too short to be worth it
fn echo_input(input: &str) -> Option<String> {
    let mut echo: String = input.chars().take(MAX_ECHO_LENGTH).collect();
    if input.chars().count() > MAX_ECHO_LENGTH {
        echo.push_str("...");
    }

    if echo.chars().count() >= MIN_ECHO_LENGTH {
        Some(echo)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_inputs_are_not_echoed() {
        let stage = StageError::from(LexerError::ConstantsOnly);
        let error = SortExpressionError::invalid(&stage, "5");
        assert_eq!(
            error.message(),
            "Sort expressions cannot only contain constant values"
        );
    }

    #[test]
    fn test_long_inputs_are_echoed() {
        let stage = StageError::from(CodegenError::NonConstantDivisor);
        let error = SortExpressionError::invalid(&stage, "Fire / (Fire - Fire)");
        assert_eq!(
            error.to_string(),
            "You may only divide by constant values\n\nExpression: Fire / (Fire - Fire)"
        );
    }

    #[test]
    fn test_echo_is_truncated() {
        let input = "x".repeat(MAX_ECHO_LENGTH + 20);
        let echo = echo_input(&input).unwrap();
        assert!(echo.ends_with("..."));
        assert_eq!(echo.chars().count(), MAX_ECHO_LENGTH + 3);
    }

    #[test]
    fn test_internal_classification() {
        assert!(StageError::from(CodegenError::UnreducedStack { remaining: 2 }).is_internal());
        assert!(!StageError::from(CodegenError::DivisionByZero).is_internal());
        assert!(!StageError::from(SyntaxError::EmptyExpression).is_internal());
        assert!(SortExpressionError::internal("stack").is_internal());
    }
}
