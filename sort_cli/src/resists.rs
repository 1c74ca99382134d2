//! Resist name snapshot loading

use crate::error::CliError;
use serde::Deserialize;
use sort_compiler::ResistNameSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ResistFile {
    resists: Vec<String>,
}

/// Load `resists = [..]` from a TOML file, or the built-in list without one
pub fn load_resists(path: Option<&Path>) -> Result<ResistNameSet, CliError> {
    let Some(path) = path else {
        log::debug!("Using built-in resist list");
        return Ok(ResistNameSet::with_standard_resists());
    };

    let content = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: ResistFile = toml::from_str(&content).map_err(|source| CliError::ResistFile {
        path: path.to_path_buf(),
        source,
    })?;

    let resists = ResistNameSet::new(file.resists);
    log::info!("Loaded {} resist names from {}", resists.len(), path.display());
    Ok(resists)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_list_without_file() {
        let resists = load_resists(None).unwrap();
        assert!(resists.contains("fire"));
    }

    #[test]
    fn test_loads_and_normalizes_names() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "resists = [\"Fire\", \" ice \", \"all\"]").unwrap();

        let resists = load_resists(Some(file.path())).unwrap();
        assert_eq!(resists.len(), 3);
        assert!(resists.contains("fire"));
        assert!(resists.contains("ice"));
        assert!(!resists.contains("water"));
    }

    #[test]
    fn test_rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "resists = \"fire\"").unwrap();

        assert!(matches!(
            load_resists(Some(file.path())),
            Err(CliError::ResistFile { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            load_resists(Some(&missing)),
            Err(CliError::Io { .. })
        ));
    }
}
