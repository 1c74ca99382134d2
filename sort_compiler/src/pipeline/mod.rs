//! Complete sort expression pipeline: text -> tokens -> postfix -> code

mod error;
mod result;

pub use error::{SortExpressionError, StageError};
pub use result::ParsedExpression;

use crate::codegen::{self, GeneratedCode};
use crate::config::compile_time::expression::MAX_EXPRESSION_LENGTH;
use crate::config::runtime::LexicalPreferences;
use crate::lexical::{LexerError, LexicalAnalyzer};
use crate::logging::codes;
use crate::symbols::ResistNameSet;
use crate::syntax::{self, PostfixParser};
use crate::{log_debug, log_error, log_success};

/// Per-call parsing options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Skip the input length cap, for trusted callers
    pub ignore_length_limit: bool,
}

/// Parse user input into a sort expression
pub fn parse_sort_expression(
    raw: &str,
    resists: &ResistNameSet,
) -> Result<ParsedExpression, SortExpressionError> {
    parse_sort_expression_with_options(raw, resists, ParseOptions::default())
}

pub fn parse_sort_expression_with_options(
    raw: &str,
    resists: &ResistNameSet,
    options: ParseOptions,
) -> Result<ParsedExpression, SortExpressionError> {
    let preferences = LexicalPreferences::default();
    let analyzer = LexicalAnalyzer::new(resists).with_preferences(preferences.clone());
    run(raw, analyzer, &preferences, options)
}

/// Parse a canonical expression recovered from a compressed record.
///
/// Aliases are not resolved and resist names are not checked against any
/// set; every other rule still applies.
pub fn parse_canonical_expression(compact: &str) -> Result<ParsedExpression, SortExpressionError> {
    let preferences = LexicalPreferences::default();
    let analyzer = LexicalAnalyzer::canonical().with_preferences(preferences.clone());
    let options = ParseOptions {
        ignore_length_limit: true,
    };
    run(compact, analyzer, &preferences, options)
}

fn run(
    raw: &str,
    mut analyzer: LexicalAnalyzer<'_>,
    preferences: &LexicalPreferences,
    options: ParseOptions,
) -> Result<ParsedExpression, SortExpressionError> {
    let outcome = compile_stages(raw, &mut analyzer, preferences, options);

    match outcome {
        Ok(parsed) => {
            log_success!(
                codes::success::EXPRESSION_PARSED,
                "Sort expression parsed",
                "pretty" => parsed.pretty,
                "compact" => parsed.compact
            );
            Ok(parsed)
        }
        Err(stage) if stage.is_internal() => {
            log_error!(codes::system::INTERNAL_ERROR, "Sort expression compiler fault",
                "reason" => stage,
                "stage_code" => stage.error_code(),
                "input" => raw
            );
            Err(SortExpressionError::internal(stage.to_string()))
        }
        Err(stage) => {
            log_debug!(code = stage.error_code(), "Sort expression rejected",
                "reason" => stage
            );
            Err(SortExpressionError::invalid(&stage, raw))
        }
    }
}

fn compile_stages(
    raw: &str,
    analyzer: &mut LexicalAnalyzer<'_>,
    preferences: &LexicalPreferences,
    options: ParseOptions,
) -> Result<ParsedExpression, StageError> {
    let length = raw.chars().count();
    if !options.ignore_length_limit && length > MAX_EXPRESSION_LENGTH {
        return Err(LexerError::ExpressionTooLong {
            length,
            limit: MAX_EXPRESSION_LENGTH,
        }
        .into());
    }

    let stream = analyzer.tokenize(raw)?;
    let parser = PostfixParser::with_positions(preferences.include_position_in_errors);
    let postfix = syntax::to_postfix_with_parser(&parser, &stream)?;
    let GeneratedCode { pretty, computed } = codegen::generate(&postfix)?;

    Ok(ParsedExpression {
        input: raw.to_string(),
        pretty,
        computed,
        compact: stream.canonical().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn resists() -> ResistNameSet {
        ResistNameSet::with_standard_resists()
    }

    fn parse(raw: &str) -> Result<ParsedExpression, SortExpressionError> {
        parse_sort_expression(raw, &resists())
    }

    fn lookup(path: &str) -> serde_json::Value {
        json!({ "$ifNull": [path, 0] })
    }

    fn message(raw: &str) -> String {
        match parse(raw) {
            Err(SortExpressionError::InvalidExpression { message }) => message,
            other => panic!("expected invalid expression for {:?}, got {:?}", raw, other),
        }
    }

    #[test]
    fn test_single_resist() {
        let parsed = parse("Ice").unwrap();
        assert_eq!(parsed.pretty, "Ice Res");
        assert_eq!(parsed.compact, "ice");
        assert_eq!(
            parsed.computed_document(),
            json!({ "$add": [lookup("$resists.ice"), lookup("$resists.all")] })
        );
    }

    #[test]
    fn test_all_plus_health() {
        let parsed = parse("All + Health").unwrap();
        assert_eq!(parsed.pretty, "All Res + Health Res");
        assert_eq!(
            parsed.computed_document(),
            json!({ "$add": [
                lookup("$resists.all"),
                { "$add": [lookup("$resists.health"), lookup("$resists.all")] }
            ] })
        );
    }

    #[test]
    fn test_grouped_subtraction() {
        let parsed = parse("INT - (DEX + STR)").unwrap();
        assert_eq!(parsed.pretty, "Int - (Dex + Str)");
        assert_eq!(parsed.input, "INT - (DEX + STR)");
        assert_eq!(
            parsed.computed_document(),
            json!({ "$subtract": [
                lookup("$bonuses.int"),
                { "$add": [lookup("$bonuses.dex"), lookup("$bonuses.str")] }
            ] })
        );
    }

    #[test]
    fn test_literal_bounds() {
        assert!(parse("str * 0.0001").is_ok());
        assert!(parse("str * 10000").is_ok());
        assert!(parse("str * 0.00009").is_err());
        assert!(parse("str * 10000.1").is_err());
        assert!(parse("Str + 0").is_err());
    }

    #[test]
    fn test_operator_budget() {
        let twenty = format!("str{}", " + str".repeat(20));
        let twenty_one = format!("str{}", " + str".repeat(21));
        assert!(parse_sort_expression_with_options(
            &twenty,
            &resists(),
            ParseOptions {
                ignore_length_limit: true
            }
        )
        .is_ok());
        assert_matches!(
            parse_sort_expression_with_options(
                &twenty_one,
                &resists(),
                ParseOptions {
                    ignore_length_limit: true
                }
            ),
            Err(SortExpressionError::InvalidExpression { .. })
        );
    }

    #[test]
    fn test_constants_only_is_rejected() {
        assert_eq!(
            message("5"),
            "Sort expressions cannot only contain constant values"
        );
    }

    #[test]
    fn test_divisor_must_be_constant() {
        assert!(message("Fire / (Fire - Fire)")
            .starts_with("You may only divide by constant values"));
        assert!(parse("Fire / 0").is_err());
    }

    #[test]
    fn test_long_input_is_echoed() {
        let text = message("strength + unknownium");
        assert!(text.contains("unknownium"));
        assert!(text.ends_with("\n\nExpression: strength + unknownium"));
    }

    #[test]
    fn test_length_limit() {
        let long = format!("str{}", " ".repeat(MAX_EXPRESSION_LENGTH));
        assert!(parse(&long).is_err());
        assert!(parse_sort_expression_with_options(
            &long,
            &resists(),
            ParseOptions {
                ignore_length_limit: true
            }
        )
        .is_ok());
    }

    #[test]
    fn test_aliases_yield_equivalent_expressions() {
        let spelled = parse("Strength + Dark Resistance").unwrap();
        let canonical = parse("str + darkness").unwrap();
        assert!(spelled.is_equivalent(&canonical));
        assert_ne!(spelled.input, canonical.input);
    }

    #[test]
    fn test_canonical_fast_path() {
        let parsed = parse("Avg Dmg * 2 + mpm").unwrap();
        let restored = parse_canonical_expression(&parsed.compact).unwrap();
        assert!(restored.is_equivalent(&parsed));
        assert!(parse_canonical_expression("Str").is_err());
    }

    #[test]
    fn test_parsed_expression_serializes_document() {
        let parsed = parse("luk").unwrap();
        let value = serde_json::to_value(&parsed).unwrap();
        assert_eq!(value["pretty"], "Luk");
        assert_eq!(value["computed"], lookup("$bonuses.luk"));
    }
}
