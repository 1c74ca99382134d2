//! Backtick-delimited encoding of sort filters
//!
//! Field order: mode, item type code, ascending flag, canonical expression,
//! weapon element, max level, min level. Levels equal to their defaults are
//! left empty, and trailing empty fields collapse into a single trailing
//! delimiter.

use super::item_type::ItemType;
use crate::config::compile_time::codec::{
    DEFAULT_MAX_LEVEL, DEFAULT_MIN_LEVEL, MAX_COMPRESSED_LENGTH,
};
use crate::logging::{codes, Code};
use crate::pipeline::{self, ParsedExpression, SortExpressionError};
use crate::{log_debug, log_success};
use serde::Serialize;

pub const DELIMITER: char = '`';

const ASCENDING_FLAG: &str = "a";
const FIELD_COUNT: usize = 7;

/// Everything needed to rerun a sort
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortFilters {
    pub mode: String,
    pub item_type: ItemType,
    pub ascending: bool,
    pub expression: ParsedExpression,
    pub weapon_element: Option<String>,
    pub max_level: u32,
    pub min_level: u32,
}

impl SortFilters {
    pub fn new(mode: impl Into<String>, item_type: ItemType, expression: ParsedExpression) -> Self {
        Self {
            mode: mode.into(),
            item_type,
            ascending: false,
            expression,
            weapon_element: None,
            max_level: DEFAULT_MAX_LEVEL,
            min_level: DEFAULT_MIN_LEVEL,
        }
    }

    pub fn ascending(mut self, ascending: bool) -> Self {
        self.ascending = ascending;
        self
    }

    /// An empty element means no element filter
    pub fn with_weapon_element(mut self, element: impl Into<String>) -> Self {
        let element = element.into();
        self.weapon_element = (!element.is_empty()).then_some(element);
        self
    }

    pub fn with_levels(mut self, min_level: u32, max_level: u32) -> Self {
        self.min_level = min_level;
        self.max_level = max_level;
        self
    }

    /// Same filters, ignoring how the expression was originally spelled
    pub fn is_equivalent(&self, other: &SortFilters) -> bool {
        self.mode == other.mode
            && self.item_type == other.item_type
            && self.ascending == other.ascending
            && self.weapon_element == other.weapon_element
            && self.max_level == other.max_level
            && self.min_level == other.min_level
            && self.expression.is_equivalent(&other.expression)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    #[error("Malformed sort record: {reason}")]
    MalformedRecord { reason: String },

    #[error("Unknown item type code '{code}'")]
    UnknownItemType { code: String },

    #[error("Invalid ascending flag '{flag}'")]
    InvalidAscendingFlag { flag: String },

    #[error("Invalid {field} level '{value}'")]
    InvalidLevel { field: &'static str, value: String },

    #[error("Sort record is {length} characters, the limit is {limit}")]
    RecordTooLong { length: usize, limit: usize },

    #[error(transparent)]
    Expression(#[from] SortExpressionError),
}

impl CodecError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::MalformedRecord { .. } => codes::codec::MALFORMED_RECORD,
            Self::UnknownItemType { .. } => codes::codec::UNKNOWN_ITEM_TYPE,
            Self::InvalidAscendingFlag { .. } => codes::codec::INVALID_ASCENDING_FLAG,
            Self::InvalidLevel { .. } => codes::codec::INVALID_LEVEL,
            Self::RecordTooLong { .. } => codes::codec::RECORD_TOO_LONG,
            Self::Expression(e) if e.is_internal() => codes::system::INTERNAL_ERROR,
            Self::Expression(_) => codes::codec::MALFORMED_RECORD,
        }
    }

    fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            reason: reason.into(),
        }
    }
}

// ============================================================================
// ENCODING
// ============================================================================

/// Encode filters, or `None` when they do not fit in a compact record
pub fn compress(filters: &SortFilters) -> Option<String> {
    match encode(filters) {
        Ok(record) => {
            log_success!(codes::success::RECORD_COMPRESSED, "Sort filters compressed",
                "length" => record.chars().count()
            );
            Some(record)
        }
        Err(error) => {
            log_debug!(code = error.error_code(), "Sort filters cannot be compressed",
                "reason" => error
            );
            None
        }
    }
}

/// Encode filters, reporting why a record cannot be produced
pub fn encode(filters: &SortFilters) -> Result<String, CodecError> {
    // an empty field decodes as absent
    if filters.mode.is_empty() {
        return Err(CodecError::malformed("missing mode"));
    }
    if filters.weapon_element.as_deref() == Some("") {
        return Err(CodecError::malformed("empty weapon element"));
    }

    let element = filters.weapon_element.as_deref().unwrap_or_default();
    for (name, value) in [("mode", filters.mode.as_str()), ("weapon element", element)] {
        if value.contains(DELIMITER) {
            return Err(CodecError::malformed(format!(
                "{} contains the record delimiter",
                name
            )));
        }
    }

    let max_level = level_field(filters.max_level, DEFAULT_MAX_LEVEL);
    let min_level = level_field(filters.min_level, DEFAULT_MIN_LEVEL);
    let fields = [
        filters.mode.as_str(),
        filters.item_type.code(),
        if filters.ascending { ASCENDING_FLAG } else { "" },
        filters.expression.compact.as_str(),
        element,
        max_level.as_str(),
        min_level.as_str(),
    ];

    let used = fields
        .iter()
        .rposition(|field| !field.is_empty())
        .map_or(0, |index| index + 1);

    let delimiter = DELIMITER.to_string();
    let mut record = fields[..used].join(delimiter.as_str());
    if used < fields.len() {
        record.push(DELIMITER);
    }

    let length = record.chars().count();
    if length > MAX_COMPRESSED_LENGTH {
        return Err(CodecError::RecordTooLong {
            length,
            limit: MAX_COMPRESSED_LENGTH,
        });
    }

    Ok(record)
}

fn level_field(level: u32, default: u32) -> String {
    if level == default {
        String::new()
    } else {
        level.to_string()
    }
}

// ============================================================================
// DECODING
// ============================================================================

/// Decode a record produced by [`compress`]
pub fn uncompress(record: &str) -> Result<SortFilters, CodecError> {
    let result = decode(record);

    match &result {
        Ok(filters) => {
            log_success!(codes::success::RECORD_DECODED, "Sort record decoded",
                "item_type" => filters.item_type,
                "expression" => filters.expression.pretty
            );
        }
        Err(error) => {
            log_debug!(code = error.error_code(), "Sort record rejected",
                "reason" => error
            );
        }
    }

    result
}

fn decode(record: &str) -> Result<SortFilters, CodecError> {
    let mut fields: Vec<&str> = record.split(DELIMITER).collect();
    if fields.len() > FIELD_COUNT {
        return Err(CodecError::malformed(format!(
            "expected at most {} fields, found {}",
            FIELD_COUNT,
            fields.len()
        )));
    }
    fields.resize(FIELD_COUNT, "");

    let Ok([mode, type_code, flag, expression, element, max_level, min_level]) =
        <[&str; FIELD_COUNT]>::try_from(fields)
    else {
        return Err(CodecError::malformed("field count"));
    };

    if mode.is_empty() {
        return Err(CodecError::malformed("missing mode"));
    }

    let item_type = ItemType::from_code(type_code).ok_or_else(|| CodecError::UnknownItemType {
        code: type_code.to_string(),
    })?;

    let ascending = match flag {
        ASCENDING_FLAG => true,
        "" => false,
        other => {
            return Err(CodecError::InvalidAscendingFlag {
                flag: other.to_string(),
            })
        }
    };

    if expression.is_empty() {
        return Err(CodecError::malformed("missing expression"));
    }
    let expression = pipeline::parse_canonical_expression(expression)?;

    Ok(SortFilters {
        mode: mode.to_string(),
        item_type,
        ascending,
        expression,
        weapon_element: (!element.is_empty()).then(|| element.to_string()),
        max_level: parse_level("max", max_level, DEFAULT_MAX_LEVEL)?,
        min_level: parse_level("min", min_level, DEFAULT_MIN_LEVEL)?,
    })
}

fn parse_level(field: &'static str, value: &str, default: u32) -> Result<u32, CodecError> {
    if value.is_empty() {
        return Ok(default);
    }
    value.parse().map_err(|_| CodecError::InvalidLevel {
        field,
        value: value.to_string(),
    })
}
