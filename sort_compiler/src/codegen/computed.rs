//! Computed expression trees for the item query layer
//!
//! A compiled expression is a tree of field lookups, constants and arithmetic.
//! [`ComputedExpression::to_document`] produces the aggregation document the
//! query layer evaluates against each stored item.

use super::error::{CodegenError, CodegenResult};
use super::stack::{evaluate, PostfixBackend};
use crate::grammar::FieldRef;
use crate::tokens::{Operator, Token};
use serde::{Serialize, Serializer};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum ComputedExpression {
    Constant(f64),
    /// Stored stat, read as 0 when absent
    Field(FieldRef),
    Binary {
        operator: Operator,
        lhs: Box<ComputedExpression>,
        rhs: Box<ComputedExpression>,
    },
    Negate(Box<ComputedExpression>),
}

impl ComputedExpression {
    pub fn binary(operator: Operator, lhs: Self, rhs: Self) -> Self {
        Self::Binary {
            operator,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Reference a stat; elemental resists also pick up the resist-all bonus
    pub fn field(field: FieldRef) -> Self {
        if field.folds_all_resist() {
            Self::binary(
                Operator::Add,
                Self::Field(field),
                Self::Field(FieldRef::all_resist()),
            )
        } else {
            Self::Field(field)
        }
    }

    pub fn as_constant(&self) -> Option<f64> {
        match self {
            Self::Constant(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_constant(&self) -> bool {
        self.as_constant().is_some()
    }

    /// Every field lookup in the tree, left to right
    pub fn fields(&self) -> Vec<&FieldRef> {
        let mut fields = Vec::new();
        self.collect_fields(&mut fields);
        fields
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a FieldRef>) {
        match self {
            Self::Constant(_) => {}
            Self::Field(field) => out.push(field),
            Self::Binary { lhs, rhs, .. } => {
                lhs.collect_fields(out);
                rhs.collect_fields(out);
            }
            Self::Negate(operand) => operand.collect_fields(out),
        }
    }

    /// Aggregation document for this tree
    pub fn to_document(&self) -> Value {
        match self {
            Self::Constant(value) => json!(value),
            Self::Field(field) => json!({ "$ifNull": [format!("${}", field.path()), 0] }),
            Self::Binary { operator, lhs, rhs } => {
                json!({ (operator.document_operator()): [lhs.to_document(), rhs.to_document()] })
            }
            Self::Negate(operand) => json!({ "$multiply": [-1, operand.to_document()] }),
        }
    }
}

impl Serialize for ComputedExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_document().serialize(serializer)
    }
}

struct ComputedBackend;

impl PostfixBackend for ComputedBackend {
    type Value = ComputedExpression;

    fn number(&self, value: f64) -> ComputedExpression {
        ComputedExpression::Constant(value)
    }

    fn operand(&self, name: &str) -> ComputedExpression {
        ComputedExpression::field(FieldRef::new(name))
    }

    fn unary(
        &self,
        _operator: Operator,
        operand: ComputedExpression,
    ) -> CodegenResult<ComputedExpression> {
        Ok(match operand {
            ComputedExpression::Constant(value) => ComputedExpression::Constant(-value),
            other => ComputedExpression::Negate(Box::new(other)),
        })
    }

    fn binary(
        &self,
        operator: Operator,
        lhs: ComputedExpression,
        rhs: ComputedExpression,
    ) -> CodegenResult<ComputedExpression> {
        if operator == Operator::Divide {
            match rhs.as_constant() {
                None => return Err(CodegenError::NonConstantDivisor),
                Some(divisor) if divisor == 0.0 => return Err(CodegenError::DivisionByZero),
                Some(_) => {}
            }
        }

        if let (Some(l), Some(r)) = (lhs.as_constant(), rhs.as_constant()) {
            return Ok(ComputedExpression::Constant(operator.apply(l, r)));
        }

        Ok(ComputedExpression::binary(operator, lhs, rhs))
    }
}

/// Compile a postfix stream into a computed expression tree
pub fn compile(postfix: &[Token]) -> CodegenResult<ComputedExpression> {
    let expression = evaluate(&ComputedBackend, postfix)?;
    if expression.is_constant() {
        return Err(CodegenError::ConstantResult);
    }
    Ok(expression)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::ResistNameSet;
    use crate::syntax::PostfixParser;
    use assert_matches::assert_matches;

    fn postfix(input: &str) -> Vec<Token> {
        let resists = ResistNameSet::with_standard_resists();
        let stream = crate::lexical::tokenize(input, &resists).unwrap();
        PostfixParser::new().to_postfix(&stream).unwrap()
    }

    fn document(input: &str) -> Value {
        compile(&postfix(input)).unwrap().to_document()
    }

    fn lookup(path: &str) -> Value {
        json!({ "$ifNull": [path, 0] })
    }

    #[test]
    fn test_resist_folds_in_all() {
        assert_eq!(
            document("Ice"),
            json!({ "$add": [lookup("$resists.ice"), lookup("$resists.all")] })
        );
        assert_eq!(document("all"), lookup("$resists.all"));
    }

    #[test]
    fn test_field_paths() {
        assert_eq!(document("str"), lookup("$bonuses.str"));
        assert_eq!(document("avg dmg"), lookup("$averageDamage"));
    }

    #[test]
    fn test_subtract_of_grouped_bonuses() {
        assert_eq!(
            document("INT - (DEX + STR)"),
            json!({ "$subtract": [
                lookup("$bonuses.int"),
                { "$add": [lookup("$bonuses.dex"), lookup("$bonuses.str")] }
            ] })
        );
    }

    #[test]
    fn test_negation_multiplies_by_minus_one() {
        assert_eq!(
            document("-str"),
            json!({ "$multiply": [-1, lookup("$bonuses.str")] })
        );
        assert_eq!(
            document("str * -2"),
            json!({ "$multiply": [lookup("$bonuses.str"), -2.0] })
        );
    }

    #[test]
    fn test_constant_divisors_are_folded() {
        assert_eq!(
            document("str / (2 * 2)"),
            json!({ "$divide": [lookup("$bonuses.str"), 4.0] })
        );
    }

    #[test]
    fn test_divisor_must_be_constant() {
        assert_eq!(
            compile(&postfix("Fire / (Fire - Fire)")),
            Err(CodegenError::NonConstantDivisor)
        );
        assert_eq!(
            compile(&postfix("str / dex")),
            Err(CodegenError::NonConstantDivisor)
        );
    }

    #[test]
    fn test_division_by_folded_zero() {
        assert_eq!(
            compile(&postfix("Fire / (1 - 1)")),
            Err(CodegenError::DivisionByZero)
        );
    }

    #[test]
    fn test_constant_result_is_rejected() {
        let tokens = vec![
            Token::Number(2.0),
            Token::Number(3.0),
            Token::Operator(Operator::Add),
        ];
        assert_eq!(compile(&tokens), Err(CodegenError::ConstantResult));
        assert_eq!(
            compile(&[Token::Number(5.0)]),
            Err(CodegenError::ConstantResult)
        );
    }

    #[test]
    fn test_compile_is_deterministic() {
        let tokens = postfix("(mpm + fire) * 2 - -bpd / 3");
        assert_eq!(compile(&tokens), compile(&tokens));
        assert_matches!(compile(&tokens), Ok(ComputedExpression::Binary { .. }));
    }

    #[test]
    fn test_fields_are_listed_in_order() {
        let expression = compile(&postfix("str + ice")).unwrap();
        let names: Vec<_> = expression.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["str", "ice", "all"]);
    }

    #[test]
    fn test_serializes_as_document() {
        let expression = compile(&postfix("luk")).unwrap();
        assert_eq!(
            serde_json::to_value(&expression).unwrap(),
            lookup("$bonuses.luk")
        );
    }
}
