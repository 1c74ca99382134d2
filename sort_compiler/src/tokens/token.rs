//! Token and operator definitions for sort expressions
use serde::{Deserialize, Serialize};
use std::fmt;

/// Arithmetic operators, including the internal unary minus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,      // +
    Subtract, // -
    Multiply, // *
    Divide,   // /
    /// Unary minus, produced by the postfix converter only
    Negate,
}

impl Operator {
    /// Binary operator for a source character
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract | Self::Negate => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Binding strength; higher binds tighter
    pub fn precedence(&self) -> u8 {
        match self {
            Self::Add | Self::Subtract => 1,
            Self::Multiply | Self::Divide => 2,
            Self::Negate => 3,
        }
    }

    pub fn is_unary(&self) -> bool {
        matches!(self, Self::Negate)
    }

    /// Operators that may appear where an operand is expected
    pub fn can_be_unary(&self) -> bool {
        matches!(self, Self::Add | Self::Subtract)
    }

    /// Aggregation operator name used in computed documents
    pub fn document_operator(&self) -> &'static str {
        match self {
            Self::Add => "$add",
            Self::Subtract => "$subtract",
            Self::Multiply | Self::Negate => "$multiply",
            Self::Divide => "$divide",
        }
    }

    /// Fold two constants. Division by zero is rejected before this is reached.
    pub fn apply(&self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => lhs / rhs,
            Self::Negate => -rhs,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single lexical unit of a sort expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Token {
    /// Numeric literal inside the accepted literal range
    Number(f64),
    Operator(Operator),
    OpenBracket,
    CloseBracket,
    /// Canonical lowercase stat name
    Operand(String),
}

impl Token {
    pub fn operand(name: impl Into<String>) -> Self {
        Self::Operand(name.into())
    }

    /// Numbers and operands: the tokens that produce a value
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Number(_) | Self::Operand(_))
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }

    pub fn as_operator(&self) -> Option<Operator> {
        match self {
            Self::Operator(op) => Some(*op),
            _ => None,
        }
    }

    /// Short description used in error messages
    pub fn describe(&self) -> String {
        match self {
            Self::Number(n) => format!("number {}", n),
            Self::Operator(op) => format!("operator '{}'", op),
            Self::OpenBracket => "'('".to_string(),
            Self::CloseBracket => "')'".to_string(),
            Self::Operand(name) => format!("'{}'", name),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Operator(op) => write!(f, "{}", op),
            Self::OpenBracket => write!(f, "("),
            Self::CloseBracket => write!(f, ")"),
            Self::Operand(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_ordering() {
        assert!(Operator::Negate.precedence() > Operator::Multiply.precedence());
        assert!(Operator::Multiply.precedence() > Operator::Add.precedence());
        assert_eq!(
            Operator::Multiply.precedence(),
            Operator::Divide.precedence()
        );
        assert_eq!(Operator::Add.precedence(), Operator::Subtract.precedence());
    }

    #[test]
    fn test_from_char_never_yields_negate() {
        let operators: Vec<_> = "+-*/".chars().filter_map(Operator::from_char).collect();
        assert_eq!(operators.len(), 4);
        assert!(!operators.contains(&Operator::Negate));
        assert_eq!(Operator::from_char('%'), None);
    }

    #[test]
    fn test_constant_folding_arithmetic() {
        assert_eq!(Operator::Add.apply(2.0, 3.0), 5.0);
        assert_eq!(Operator::Subtract.apply(2.0, 3.0), -1.0);
        assert_eq!(Operator::Multiply.apply(2.0, 3.0), 6.0);
        assert_eq!(Operator::Divide.apply(3.0, 2.0), 1.5);
        assert_eq!(Operator::Negate.apply(0.0, 4.0), -4.0);
    }

    #[test]
    fn test_token_display_is_compact() {
        assert_eq!(Token::Number(0.0001).to_string(), "0.0001");
        assert_eq!(Token::Number(10000.0).to_string(), "10000");
        assert_eq!(Token::Operator(Operator::Negate).to_string(), "-");
        assert_eq!(Token::operand("darkness").to_string(), "darkness");
    }
}
