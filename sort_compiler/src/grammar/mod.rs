//! Stat name grammar: classification, aliases and operand macros

pub mod aliases;
pub mod fields;
pub mod macros;

pub use aliases::unalias_bonus_name;
pub use fields::{classify_field, FieldKind, FieldRef, ALL_RESIST_NAME, BONUS_NAMES, DAMAGE_NAME};
pub use macros::{lookup_macro, MacroDefinition, MACROS};
