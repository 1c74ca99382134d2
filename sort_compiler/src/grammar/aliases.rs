//! Alias resolution for stat names
//!
//! Users write stats the way the game shows them (`Strength`, `Dark Res`,
//! `avg dmg`). Resolution maps these onto canonical lowercase names.

/// Suffixes that only restate that a name is a resistance
const RESIST_SUFFIXES: &[&str] = &[" resistance", " resist", " res"];

/// Alternate spelling to canonical name
const ALIASES: &[(&str, &str)] = &[
    ("strength", "str"),
    ("intellect", "int"),
    ("intelligence", "int"),
    ("dexterity", "dex"),
    ("endurance", "end"),
    ("charisma", "cha"),
    ("luck", "luk"),
    ("wisdom", "wis"),
    ("critical", "crit"),
    ("dmg", "damage"),
    ("avg damage", "damage"),
    ("average damage", "damage"),
    ("avg dmg", "damage"),
    ("dark", "darkness"),
    ("hp", "health"),
    ("immob", "immobility"),
    ("?", "???"),
    ("??", "???"),
];

fn strip_resist_suffixes(name: &str) -> &str {
    let mut current = name.trim();
    while let Some(stripped) = RESIST_SUFFIXES
        .iter()
        .find_map(move |suffix| current.strip_suffix(*suffix))
    {
        current = stripped.trim();
    }
    current
}

/// Map a stat name to its canonical form.
///
/// Input is expected lowercase. Resolution is idempotent: resolving a
/// canonical name returns it unchanged.
pub fn unalias_bonus_name(name: &str) -> String {
    let name = strip_resist_suffixes(name);

    ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| name.to_string())
}

/// Whether `name` is already canonical
pub fn is_canonical(name: &str) -> bool {
    unalias_bonus_name(name) == name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bonus_aliases() {
        assert_eq!(unalias_bonus_name("strength"), "str");
        assert_eq!(unalias_bonus_name("intelligence"), "int");
        assert_eq!(unalias_bonus_name("luck"), "luk");
        assert_eq!(unalias_bonus_name("critical"), "crit");
    }

    #[test]
    fn test_damage_aliases() {
        for alias in ["dmg", "avg damage", "average damage", "avg dmg", "damage"] {
            assert_eq!(unalias_bonus_name(alias), "damage", "alias {}", alias);
        }
    }

    #[test]
    fn test_resist_suffixes_are_stripped() {
        assert_eq!(unalias_bonus_name("ice res"), "ice");
        assert_eq!(unalias_bonus_name("dark resist"), "darkness");
        assert_eq!(unalias_bonus_name("fire resistance"), "fire");
        assert_eq!(unalias_bonus_name("health res res"), "health");
        assert_eq!(unalias_bonus_name("res"), "res");
    }

    #[test]
    fn test_question_marks() {
        assert_eq!(unalias_bonus_name("?"), "???");
        assert_eq!(unalias_bonus_name("??"), "???");
        assert_eq!(unalias_bonus_name("??? res"), "???");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let inputs = [
            "strength",
            "dark res",
            "avg dmg",
            "hp resistance",
            "fire res res",
            "?? resist",
            "immob",
            "pierce",
            "bacon",
        ];

        for input in inputs {
            let once = unalias_bonus_name(input);
            assert_eq!(unalias_bonus_name(&once), once, "input {}", input);
            assert!(is_canonical(&once));
        }
    }

    #[test]
    fn test_alias_targets_are_canonical() {
        for (alias, canonical) in ALIASES {
            assert!(is_canonical(canonical), "{} -> {}", alias, canonical);
        }
    }
}
