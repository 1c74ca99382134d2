//! Stat name classification and field references
//!
//! Every stat name is one of three kinds: a bonus stat from a fixed set, the
//! special `damage` name, or a resistance. Anything that is not a bonus and
//! not `damage` is a resistance.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed set of bonus stat names
pub const BONUS_NAMES: &[&str] = &[
    "str", "int", "dex", "end", "cha", "luk", "wis", "crit", "bonus", "melee", "pierce", "magic",
    "block", "parry", "dodge",
];

/// Canonical name of the average damage stat
pub const DAMAGE_NAME: &str = "damage";

/// Resistance that applies to every element
pub const ALL_RESIST_NAME: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Bonus,
    Resist,
    Damage,
}

impl FieldKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bonus => "bonus",
            Self::Resist => "resist",
            Self::Damage => "damage",
        }
    }
}

pub fn is_bonus_name(name: &str) -> bool {
    BONUS_NAMES.contains(&name)
}

/// Classify a canonical stat name
pub fn classify_field(name: &str) -> FieldKind {
    if name == DAMAGE_NAME {
        FieldKind::Damage
    } else if is_bonus_name(name) {
        FieldKind::Bonus
    } else {
        FieldKind::Resist
    }
}

/// A reference to a stored item stat
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldRef {
    pub kind: FieldKind,
    pub name: String,
}

impl FieldRef {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind: classify_field(&name),
            name,
        }
    }

    pub fn all_resist() -> Self {
        Self {
            kind: FieldKind::Resist,
            name: ALL_RESIST_NAME.to_string(),
        }
    }

    pub fn is_resist(&self) -> bool {
        self.kind == FieldKind::Resist
    }

    /// Whether referencing this field should also add the resist-all bonus
    pub fn folds_all_resist(&self) -> bool {
        self.is_resist() && self.name != ALL_RESIST_NAME
    }

    /// Document path of the stored value, without the leading `$`
    pub fn path(&self) -> String {
        match self.kind {
            FieldKind::Bonus => format!("bonuses.{}", self.name),
            FieldKind::Resist => format!("resists.{}", self.name),
            FieldKind::Damage => "averageDamage".to_string(),
        }
    }

    /// Human readable name: capitalized words, `Avg Damage`, ` Res` suffix on resists
    pub fn display_name(&self) -> String {
        match self.kind {
            FieldKind::Damage => "Avg Damage".to_string(),
            FieldKind::Bonus => capitalize_words(&self.name),
            FieldKind::Resist => format!("{} Res", capitalize_words(&self.name)),
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Uppercase the first letter of every space separated word
pub fn capitalize_words(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
