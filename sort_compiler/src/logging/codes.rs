//! Consolidated error codes and classification system
//!
//! Single source of truth for all error codes, their metadata, and classification functions.
//! This module combines code constants with their behavioral metadata in one place.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    /// User input problems are shown to the user, never reported as faults
    pub user_facing: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        user_facing: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            user_facing,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const INVALID_CHARACTER: Code = Code::new("E020");
    pub const INVALID_NUMBER: Code = Code::new("E021");
    pub const NUMBER_OUT_OF_RANGE: Code = Code::new("E022");
    pub const OPERAND_TOO_LONG: Code = Code::new("E023");
    pub const TOO_MANY_OPERATORS: Code = Code::new("E024");
    pub const UNKNOWN_RESIST: Code = Code::new("E025");
    pub const CONSTANTS_ONLY: Code = Code::new("E026");
    pub const EXPRESSION_TOO_LONG: Code = Code::new("E027");
    pub const NON_CANONICAL_OPERAND: Code = Code::new("E028");
}

/// Syntax (infix to postfix) error codes
pub mod syntax {
    use super::Code;

    pub const EMPTY_EXPRESSION: Code = Code::new("E040");
    pub const MISPLACED_OPEN_BRACKET: Code = Code::new("E041");
    pub const MISPLACED_CLOSE_BRACKET: Code = Code::new("E042");
    pub const MISPLACED_OPERATOR: Code = Code::new("E043");
    pub const TRAILING_OPERATOR: Code = Code::new("E044");
    pub const UNBALANCED_BRACKETS: Code = Code::new("E045");
    pub const MISSING_OPERATOR: Code = Code::new("E046");
}

/// Code generation error codes
pub mod codegen {
    use super::Code;

    pub const NON_CONSTANT_DIVISOR: Code = Code::new("E070");
    pub const DIVISION_BY_ZERO: Code = Code::new("E071");
    pub const CONSTANT_RESULT: Code = Code::new("E072");
    pub const STACK_UNDERFLOW: Code = Code::new("E073");
    pub const UNREDUCED_STACK: Code = Code::new("E074");
}

/// Compression codec error codes
pub mod codec {
    use super::Code;

    pub const MALFORMED_RECORD: Code = Code::new("E090");
    pub const UNKNOWN_ITEM_TYPE: Code = Code::new("E091");
    pub const INVALID_ASCENDING_FLAG: Code = Code::new("E092");
    pub const INVALID_LEVEL: Code = Code::new("E093");
    pub const RECORD_TOO_LONG: Code = Code::new("E094");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const POSTFIX_CONVERSION_COMPLETE: Code = Code::new("I040");
    pub const CODE_GENERATION_COMPLETE: Code = Code::new("I070");
    pub const EXPRESSION_PARSED: Code = Code::new("I071");
    pub const RECORD_COMPRESSED: Code = Code::new("I090");
    pub const RECORD_DECODED: Code = Code::new("I091");
    pub const BATCH_COMPLETE: Code = Code::new("I095");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn user_error(
    code: &'static str,
    category: &'static str,
    description: &'static str,
    recommended_action: &'static str,
) -> ErrorMetadata {
    ErrorMetadata::new(
        code,
        category,
        Severity::Low,
        true,
        description,
        recommended_action,
    )
}

fn internal_error(
    code: &'static str,
    category: &'static str,
    description: &'static str,
) -> ErrorMetadata {
    ErrorMetadata::new(
        code,
        category,
        Severity::Critical,
        false,
        description,
        "File a bug report with the offending expression",
    )
}

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let entries = [
            // System errors
            internal_error("ERR001", "System", "Critical internal system error"),
            internal_error("ERR002", "System", "System initialization failure"),
            // Lexical errors
            user_error(
                "E020",
                "Lexical",
                "Character is not allowed in a sort expression",
                "Use only stat names, numbers, brackets and + - * /",
            ),
            user_error(
                "E021",
                "Lexical",
                "Numeric literal is not a valid number",
                "Write numbers like 3, 0.5 or .25",
            ),
            user_error(
                "E022",
                "Lexical",
                "Numeric literal outside the accepted range",
                "Use numbers between 0.0001 and 10000",
            ),
            user_error(
                "E023",
                "Lexical",
                "Operand or number exceeds the maximum length",
                "Shorten the stat name or number",
            ),
            user_error(
                "E024",
                "Lexical",
                "Expression uses too many operators",
                "Simplify the expression",
            ),
            user_error(
                "E025",
                "Lexical",
                "Unknown stat or resistance name",
                "Check the spelling of the stat name",
            ),
            user_error(
                "E026",
                "Lexical",
                "Expression contains only constant values",
                "Reference at least one stat",
            ),
            user_error(
                "E027",
                "Lexical",
                "Expression exceeds the maximum input length",
                "Shorten the expression",
            ),
            user_error(
                "E028",
                "Lexical",
                "Compressed expression contains a non-canonical name",
                "Regenerate the compressed record",
            ),
            // Syntax errors
            user_error(
                "E040",
                "Syntax",
                "Expression is empty",
                "Provide a sort expression",
            ),
            user_error(
                "E041",
                "Syntax",
                "Opening bracket directly after a value or closing bracket",
                "Insert an operator before the bracket",
            ),
            user_error(
                "E042",
                "Syntax",
                "Closing bracket directly after an operator or opening bracket",
                "Remove the empty brackets or complete the operation",
            ),
            user_error(
                "E043",
                "Syntax",
                "Operator where a value was expected",
                "Only + and - may appear before a value",
            ),
            user_error(
                "E044",
                "Syntax",
                "Expression ends with an operator",
                "Complete the final operation",
            ),
            user_error(
                "E045",
                "Syntax",
                "Brackets are not balanced",
                "Match every ( with a )",
            ),
            user_error(
                "E046",
                "Syntax",
                "Two values without an operator between them",
                "Insert an operator between the values",
            ),
            // Code generation errors
            user_error(
                "E070",
                "Codegen",
                "Division by a non-constant value",
                "Divide only by numbers",
            ),
            user_error(
                "E071",
                "Codegen",
                "Division by zero",
                "Divide by a non-zero number",
            ),
            user_error(
                "E072",
                "Codegen",
                "Expression reduces to a constant",
                "Reference at least one stat",
            ),
            internal_error("E073", "Codegen", "Evaluation stack underflow"),
            internal_error(
                "E074",
                "Codegen",
                "Evaluation stack did not reduce to a single value",
            ),
            // Codec errors
            user_error(
                "E090",
                "Codec",
                "Compressed record is malformed",
                "Regenerate the compressed record",
            ),
            user_error(
                "E091",
                "Codec",
                "Compressed record names an unknown item type",
                "Regenerate the compressed record",
            ),
            user_error(
                "E092",
                "Codec",
                "Compressed record has an invalid ascending flag",
                "Regenerate the compressed record",
            ),
            user_error(
                "E093",
                "Codec",
                "Compressed record has an invalid level bound",
                "Regenerate the compressed record",
            ),
            user_error(
                "E094",
                "Codec",
                "Record does not fit into an interaction identifier",
                "Store the sort filters through the long-lived cache",
            ),
        ];

        entries
            .into_iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if the code describes a user input problem
pub fn is_user_facing(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.user_facing)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_code_has_metadata() {
        let codes = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            lexical::INVALID_CHARACTER,
            lexical::INVALID_NUMBER,
            lexical::NUMBER_OUT_OF_RANGE,
            lexical::OPERAND_TOO_LONG,
            lexical::TOO_MANY_OPERATORS,
            lexical::UNKNOWN_RESIST,
            lexical::CONSTANTS_ONLY,
            lexical::EXPRESSION_TOO_LONG,
            lexical::NON_CANONICAL_OPERAND,
            syntax::EMPTY_EXPRESSION,
            syntax::MISPLACED_OPEN_BRACKET,
            syntax::MISPLACED_CLOSE_BRACKET,
            syntax::MISPLACED_OPERATOR,
            syntax::TRAILING_OPERATOR,
            syntax::UNBALANCED_BRACKETS,
            syntax::MISSING_OPERATOR,
            codegen::NON_CONSTANT_DIVISOR,
            codegen::DIVISION_BY_ZERO,
            codegen::CONSTANT_RESULT,
            codegen::STACK_UNDERFLOW,
            codegen::UNREDUCED_STACK,
            codec::MALFORMED_RECORD,
            codec::UNKNOWN_ITEM_TYPE,
            codec::INVALID_ASCENDING_FLAG,
            codec::INVALID_LEVEL,
            codec::RECORD_TOO_LONG,
        ];

        for code in codes {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
    }

    #[test]
    fn test_internal_codes_are_not_user_facing() {
        assert!(!is_user_facing(system::INTERNAL_ERROR.as_str()));
        assert!(!is_user_facing(codegen::STACK_UNDERFLOW.as_str()));
        assert!(is_user_facing(codegen::NON_CONSTANT_DIVISOR.as_str()));
        assert_eq!(
            get_severity(codegen::UNREDUCED_STACK.as_str()),
            Severity::Critical
        );
    }

    #[test]
    fn test_unknown_code_fallbacks() {
        assert_eq!(get_description("E999"), "Unknown error");
        assert_eq!(get_category("E999"), "Unknown");
        assert_eq!(get_action("E999"), "No specific action available");
    }
}
