//! Code generation from postfix streams
//!
//! Two backends share one stack evaluator: [`pretty::render`] produces the
//! display form shown to users and [`computed::compile`] produces the
//! expression tree handed to the query layer.

pub mod computed;
mod error;
pub mod pretty;
pub mod stack;

pub use computed::{compile, ComputedExpression};
pub use error::{CodegenError, CodegenResult};
pub use pretty::render;
pub use stack::{evaluate, EvaluationStack, PostfixBackend};

use crate::logging::codes;
use crate::tokens::Token;
use crate::{log_debug, log_success};

/// Output of both backends for one postfix stream
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedCode {
    pub pretty: String,
    pub computed: ComputedExpression,
}

/// Run both backends with logging
pub fn generate(postfix: &[Token]) -> CodegenResult<GeneratedCode> {
    let result = computed::compile(postfix).and_then(|computed| {
        let pretty = pretty::render(postfix)?;
        Ok(GeneratedCode { pretty, computed })
    });

    match &result {
        Ok(generated) => {
            log_success!(
                codes::success::CODE_GENERATION_COMPLETE,
                "Code generation completed",
                "fields" => generated.computed.fields().len()
            );
        }
        Err(error) if !error.is_internal() => {
            log_debug!(code = error.error_code(), "Expression rejected by code generator",
                "reason" => error
            );
        }
        Err(_) => {}
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::Operator;

    #[test]
    fn test_generate_runs_both_backends() {
        let postfix = vec![
            Token::operand("str"),
            Token::Number(2.0),
            Token::Operator(Operator::Multiply),
        ];
        let generated = generate(&postfix).unwrap();
        assert_eq!(generated.pretty, "Str * 2");
        assert!(!generated.computed.is_constant());
    }

    #[test]
    fn test_generate_stops_at_first_error() {
        let postfix = vec![
            Token::operand("str"),
            Token::operand("dex"),
            Token::Operator(Operator::Divide),
        ];
        assert_eq!(generate(&postfix), Err(CodegenError::NonConstantDivisor));
    }
}
