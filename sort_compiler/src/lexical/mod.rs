//! Lexical analysis module
//!
//! Turns raw expression text into a [`TokenStream`]. Two entry points exist:
//! [`tokenize`] for user input and [`tokenize_canonical`] for expressions
//! recovered from compressed records.

pub mod analyzer;

use crate::config::compile_time::expression::MAX_OPERATOR_COUNT;
use crate::config::compile_time::lexical::*;
use crate::symbols::ResistNameSet;
use crate::tokens::TokenStream;

pub use analyzer::{LexerError, LexicalAnalyzer, LexicalMetrics, NameMode};

// ============================================================================
// MODULE API
// ============================================================================

/// Tokenize user input, resolving aliases and validating resists
pub fn tokenize(expression: &str, resists: &ResistNameSet) -> Result<TokenStream, LexerError> {
    LexicalAnalyzer::new(resists).tokenize(expression)
}

/// Tokenize an already canonical expression without alias resolution
pub fn tokenize_canonical(expression: &str) -> Result<TokenStream, LexerError> {
    LexicalAnalyzer::canonical().tokenize(expression)
}

// ============================================================================
// LIMITS
// ============================================================================

/// Compile-time lexical limits, for reporting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LexicalLimits {
    pub max_operand_length: usize,
    pub max_operator_count: usize,
    pub min_literal: f64,
    pub max_literal: f64,
}

pub fn get_lexical_limits() -> LexicalLimits {
    LexicalLimits {
        max_operand_length: MAX_OPERAND_LENGTH,
        max_operator_count: MAX_OPERATOR_COUNT,
        min_literal: MIN_LITERAL,
        max_literal: MAX_LITERAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_entry_points_agree() {
        let resists = ResistNameSet::with_standard_resists();

        let user = tokenize("Fire Res + mpm", &resists).unwrap();
        let canonical = tokenize_canonical(user.canonical()).unwrap();

        assert_eq!(canonical.values(), user.values());
        assert_eq!(canonical.canonical(), user.canonical());
    }

    #[test]
    fn test_limits_report() {
        let limits = get_lexical_limits();
        assert_eq!(limits.max_operand_length, 20);
        assert_eq!(limits.max_operator_count, 20);
        assert_eq!(limits.min_literal, 0.0001);
        assert_eq!(limits.max_literal, 10000.0);
    }
}
