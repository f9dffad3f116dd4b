//! Undo history settings, loaded from TOML

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings for a [`CommandHistory`](crate::commands::CommandHistory)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of undo steps kept; unlimited when absent
    #[serde(default)]
    pub max_depth: Option<usize>,
}

impl HistoryConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_max_depth() {
        let config = HistoryConfig::from_toml_str("max_depth = 50").unwrap();
        assert_eq!(config.max_depth, Some(50));
    }

    #[test]
    fn test_empty_document_is_unlimited() {
        let config = HistoryConfig::from_toml_str("").unwrap();
        assert_eq!(config, HistoryConfig::default());
        assert!(config.max_depth.is_none());
    }

    #[test]
    fn test_bad_value_is_parse_error() {
        let err = HistoryConfig::from_toml_str("max_depth = \"lots\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_depth = 3").unwrap();

        let config = HistoryConfig::load(file.path()).unwrap();
        assert_eq!(config.max_depth, Some(3));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = HistoryConfig::load(&dir.path().join("history.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
