//! Operand macros
//!
//! A macro name stands for the average of three bonus stats and expands to
//! `( a + b + c ) / 3` in the token stream.
use crate::tokens::{Operator, Token};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroDefinition {
    pub name: &'static str,
    pub members: [&'static str; 3],
}

impl MacroDefinition {
    /// Expansion tokens, in source order
    pub fn expand(&self) -> Vec<Token> {
        let [a, b, c] = self.members;
        vec![
            Token::OpenBracket,
            Token::operand(a),
            Token::Operator(Operator::Add),
            Token::operand(b),
            Token::Operator(Operator::Add),
            Token::operand(c),
            Token::CloseBracket,
            Token::Operator(Operator::Divide),
            Token::Number(self.members.len() as f64),
        ]
    }

    /// Operators the expansion adds to the expression budget
    pub fn operator_cost(&self) -> usize {
        self.expand().iter().filter(|t| t.is_operator()).count()
    }
}

pub const MACROS: &[MacroDefinition] = &[
    MacroDefinition {
        name: "mpm",
        members: ["melee", "pierce", "magic"],
    },
    MacroDefinition {
        name: "bpd",
        members: ["block", "parry", "dodge"],
    },
];

pub fn lookup_macro(name: &str) -> Option<&'static MacroDefinition> {
    MACROS.iter().find(|m| m.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::compile_time::expression::MACRO_OPERATOR_COST;
    use crate::grammar::fields::is_bonus_name;

    #[test]
    fn test_expansion_shape() {
        let mpm = lookup_macro("mpm").unwrap();
        let tokens = mpm.expand();

        assert_eq!(tokens.len(), 9);
        assert_eq!(tokens[1], Token::operand("melee"));
        assert_eq!(tokens[8], Token::Number(3.0));
    }

    #[test]
    fn test_operator_cost_matches_configuration() {
        for definition in MACROS {
            assert_eq!(definition.operator_cost(), MACRO_OPERATOR_COST);
        }
    }

    #[test]
    fn test_members_are_bonus_stats() {
        for definition in MACROS {
            assert!(definition.members.iter().all(|m| is_bonus_name(m)));
            assert!(!is_bonus_name(definition.name));
        }
    }

    #[test]
    fn test_unknown_macro() {
        assert!(lookup_macro("str").is_none());
        assert_eq!(lookup_macro("bpd").map(|m| m.members[0]), Some("block"));
    }
}
