//! Human readable rendering of a postfix stream

use super::error::CodegenResult;
use super::stack::{evaluate, PostfixBackend};
use crate::grammar::FieldRef;
use crate::tokens::{Operator, Token};

/// Intermediate display value
#[derive(Debug, Clone, PartialEq)]
enum DisplayValue {
    Number(f64),
    /// Single field reference, possibly negated
    Term(String),
    /// Multi-term text that needs brackets under a tighter operator
    Compound(String),
}

impl DisplayValue {
    fn into_text(self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Term(text) | Self::Compound(text) => text,
        }
    }

    /// Text of this value as an operand of `operator`
    fn operand_text(self, operator: Operator) -> String {
        match self {
            Self::Compound(text) if operator != Operator::Add => format!("({})", text),
            other => other.into_text(),
        }
    }
}

struct PrettyBackend;

impl PostfixBackend for PrettyBackend {
    type Value = DisplayValue;

    fn number(&self, value: f64) -> DisplayValue {
        DisplayValue::Number(value)
    }

    fn operand(&self, name: &str) -> DisplayValue {
        DisplayValue::Term(FieldRef::new(name).display_name())
    }

    fn unary(&self, _operator: Operator, operand: DisplayValue) -> CodegenResult<DisplayValue> {
        Ok(match operand {
            DisplayValue::Number(value) => DisplayValue::Number(-value),
            DisplayValue::Term(text) if !text.starts_with('-') => {
                DisplayValue::Term(format!("-{}", text))
            }
            DisplayValue::Term(text) | DisplayValue::Compound(text) => {
                DisplayValue::Term(format!("-({})", text))
            }
        })
    }

    fn binary(
        &self,
        operator: Operator,
        lhs: DisplayValue,
        rhs: DisplayValue,
    ) -> CodegenResult<DisplayValue> {
        if let (DisplayValue::Number(l), DisplayValue::Number(r)) = (&lhs, &rhs) {
            return Ok(DisplayValue::Number(operator.apply(*l, *r)));
        }

        Ok(DisplayValue::Compound(format!(
            "{} {} {}",
            lhs.operand_text(operator),
            operator.symbol(),
            rhs.operand_text(operator)
        )))
    }
}

/// Render a postfix stream as display text
pub fn render(postfix: &[Token]) -> CodegenResult<String> {
    evaluate(&PrettyBackend, postfix).map(DisplayValue::into_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::ResistNameSet;
    use crate::syntax::PostfixParser;

    fn pretty(input: &str) -> String {
        let resists = ResistNameSet::with_standard_resists();
        let stream = crate::lexical::tokenize(input, &resists).unwrap();
        let postfix = PostfixParser::new().to_postfix(&stream).unwrap();
        render(&postfix).unwrap()
    }

    fn is_balanced(text: &str) -> bool {
        let mut depth = 0i32;
        for ch in text.chars() {
            match ch {
                '(' => depth += 1,
                ')' => depth -= 1,
                _ => {}
            }
            if depth < 0 {
                return false;
            }
        }
        depth == 0
    }

    #[test]
    fn test_display_names() {
        assert_eq!(pretty("Ice"), "Ice Res");
        assert_eq!(pretty("All + Health"), "All Res + Health Res");
        assert_eq!(pretty("damage"), "Avg Damage");
        assert_eq!(pretty("strength"), "Str");
    }

    #[test]
    fn test_compound_operands_are_bracketed() {
        assert_eq!(pretty("INT - (DEX + STR)"), "Int - (Dex + Str)");
        assert_eq!(pretty("(str + dex) * 2"), "(Str + Dex) * 2");
        assert_eq!(pretty("str + dex * 2"), "Str + Dex * 2");
        assert_eq!(pretty("str + (dex + luk)"), "Str + Dex + Luk");
    }

    #[test]
    fn test_constants_are_folded() {
        assert_eq!(pretty("str * (2 + 3)"), "Str * 5");
        assert_eq!(pretty("str / (1 / 2)"), "Str / 0.5");
        assert_eq!(pretty("str * -2"), "Str * -2");
    }

    #[test]
    fn test_negation() {
        assert_eq!(pretty("-str"), "-Str");
        assert_eq!(pretty("- -str"), "-(-Str)");
        assert_eq!(pretty("-(str + dex)"), "-(Str + Dex)");
        assert_eq!(pretty("-str * dex"), "-Str * Dex");
    }

    #[test]
    fn test_macros_render_expanded() {
        assert_eq!(pretty("mpm"), "(Melee + Pierce + Magic) / 3");
    }

    #[test]
    fn test_output_is_bracket_balanced() {
        for input in [
            "INT - (DEX + STR)",
            "((str)) * (dex - (luk / 2))",
            "-(mpm - bpd) * fire",
            "str",
        ] {
            assert!(is_balanced(&pretty(input)), "unbalanced output for {}", input);
        }
    }
}
