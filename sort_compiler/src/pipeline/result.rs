use crate::codegen::ComputedExpression;
use serde::Serialize;
use serde_json::Value;

/// A successfully parsed sort expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedExpression {
    /// Text as the user typed it
    pub input: String,
    /// Display form, e.g. `Int - (Dex + Str)`
    pub pretty: String,
    /// Tree handed to the query layer
    pub computed: ComputedExpression,
    /// Canonical source used in compressed records
    pub compact: String,
}

impl ParsedExpression {
    /// Aggregation document for the query layer
    pub fn computed_document(&self) -> Value {
        self.computed.to_document()
    }

    /// Same expression regardless of how it was originally spelled
    pub fn is_equivalent(&self, other: &ParsedExpression) -> bool {
        self.compact == other.compact
            && self.pretty == other.pretty
            && self.computed == other.computed
    }
}
