// Internal modules
pub mod batch;
pub mod codegen;
pub mod compression;
pub mod config;
pub mod grammar;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod symbols;
pub mod syntax;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use batch::{parse_many, BatchConfig, BatchError, BatchResults};
pub use codegen::ComputedExpression;
pub use compression::{compress, uncompress, CodecError, ItemType, SortFilters};
pub use grammar::unalias_bonus_name;
pub use pipeline::{
    parse_canonical_expression, parse_sort_expression, parse_sort_expression_with_options,
    ParseOptions, ParsedExpression, SortExpressionError,
};
pub use symbols::ResistNameSet;
