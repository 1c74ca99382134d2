//! Snapshot of resistance names known to the item database

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Resistances found on items in the live game data
pub const STANDARD_RESISTS: &[&str] = &[
    "all",
    "fire",
    "water",
    "wind",
    "ice",
    "earth",
    "energy",
    "light",
    "darkness",
    "metal",
    "nature",
    "poison",
    "disease",
    "good",
    "evil",
    "bacon",
    "health",
    "immobility",
    "???",
];

/// Immutable set of valid resistance names.
///
/// Names are stored trimmed and lowercase. The set is built once and then
/// shared by reference across any number of parses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResistNameSet {
    names: BTreeSet<String>,
}

impl ResistNameSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|name| name.as_ref().trim().to_lowercase())
                .filter(|name| !name.is_empty())
                .collect(),
        }
    }

    pub fn with_standard_resists() -> Self {
        Self::new(STANDARD_RESISTS)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ResistNameSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_normalized() {
        let set = ResistNameSet::new(["  Fire ", "ICE", ""]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("fire"));
        assert!(set.contains("ice"));
        assert!(!set.contains("Fire"));
    }

    #[test]
    fn test_standard_resists() {
        let set = ResistNameSet::with_standard_resists();
        for name in ["all", "darkness", "health", "immobility", "???"] {
            assert!(set.contains(name), "missing {}", name);
        }
        assert!(!set.contains("str"));
    }

    #[test]
    fn test_serde_is_a_plain_list() {
        let set: ResistNameSet = ["ice", "fire"].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["fire","ice"]"#);

        let back: ResistNameSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn test_shared_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResistNameSet>();
    }
}
