//! Code generation errors

use crate::logging::{codes, Code};

pub type CodegenResult<T> = Result<T, CodegenError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodegenError {
    #[error("You may only divide by constant values")]
    NonConstantDivisor,

    #[error("Cannot divide by zero")]
    DivisionByZero,

    #[error("Sort expressions cannot only contain constant values")]
    ConstantResult,

    #[error("Evaluation stack underflow while applying '{operator}'")]
    StackUnderflow { operator: char },

    #[error("Evaluation stack holds {remaining} values after the final token")]
    UnreducedStack { remaining: usize },

    #[error("Unexpected {token} in postfix stream")]
    MalformedPostfix { token: String },
}

impl CodegenError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::NonConstantDivisor => codes::codegen::NON_CONSTANT_DIVISOR,
            Self::DivisionByZero => codes::codegen::DIVISION_BY_ZERO,
            Self::ConstantResult => codes::codegen::CONSTANT_RESULT,
            Self::StackUnderflow { .. } => codes::codegen::STACK_UNDERFLOW,
            Self::UnreducedStack { .. } => codes::codegen::UNREDUCED_STACK,
            Self::MalformedPostfix { .. } => codes::system::INTERNAL_ERROR,
        }
    }

    /// Faults in the compiler itself rather than in the user's expression
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::StackUnderflow { .. } | Self::UnreducedStack { .. } | Self::MalformedPostfix { .. }
        )
    }
}
