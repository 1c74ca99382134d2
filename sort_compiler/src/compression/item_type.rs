use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Item categories that can be sorted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Weapon,
    Accessory,
    Cape,
    Helm,
    Belt,
    Necklace,
    Ring,
    Trinket,
    Bracer,
    Pet,
}

impl ItemType {
    pub const ALL: [ItemType; 10] = [
        Self::Weapon,
        Self::Accessory,
        Self::Cape,
        Self::Helm,
        Self::Belt,
        Self::Necklace,
        Self::Ring,
        Self::Trinket,
        Self::Bracer,
        Self::Pet,
    ];

    /// Short code used in compressed records
    pub const fn code(self) -> &'static str {
        match self {
            Self::Weapon => "w",
            Self::Accessory => "a",
            Self::Cape => "c",
            Self::Helm => "h",
            Self::Belt => "b",
            Self::Necklace => "n",
            Self::Ring => "r",
            Self::Trinket => "t",
            Self::Bracer => "br",
            Self::Pet => "p",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|item_type| item_type.code() == code)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weapon => "weapon",
            Self::Accessory => "accessory",
            Self::Cape => "cape",
            Self::Helm => "helm",
            Self::Belt => "belt",
            Self::Necklace => "necklace",
            Self::Ring => "ring",
            Self::Trinket => "trinket",
            Self::Bracer => "bracer",
            Self::Pet => "pet",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown item type '{0}'")]
pub struct UnknownItemType(pub String);

impl FromStr for ItemType {
    type Err = UnknownItemType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|item_type| item_type.as_str() == lowered)
            .ok_or_else(|| UnknownItemType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_are_unique_and_reversible() {
        let codes: HashSet<_> = ItemType::ALL.iter().map(|t| t.code()).collect();
        assert_eq!(codes.len(), ItemType::ALL.len());

        for item_type in ItemType::ALL {
            assert_eq!(ItemType::from_code(item_type.code()), Some(item_type));
        }
        assert_eq!(ItemType::from_code("x"), None);
        assert_eq!(ItemType::from_code("B"), None);
    }

    #[test]
    fn test_bracer_uses_two_letters() {
        assert_eq!(ItemType::Bracer.code(), "br");
        assert_eq!(ItemType::Belt.code(), "b");
    }

    #[test]
    fn test_parse_from_name() {
        assert_eq!("Cape".parse::<ItemType>(), Ok(ItemType::Cape));
        assert!("boots".parse::<ItemType>().is_err());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&ItemType::Necklace).unwrap(),
            "\"necklace\""
        );
    }
}
