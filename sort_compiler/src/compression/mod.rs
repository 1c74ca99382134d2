//! Compact reversible records for embedding sort filters in short identifiers

pub mod codec;
pub mod item_type;

pub use codec::{compress, encode, uncompress, CodecError, SortFilters, DELIMITER};
pub use item_type::{ItemType, UnknownItemType};
