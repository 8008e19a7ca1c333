//! Index configuration.
//!
//! ```
//! use lucerna::analysis::AnalyzerKind;
//! use lucerna::config::IndexConfig;
//!
//! let config = IndexConfig::from_json_str(r#"{"analyzer": "whitespace"}"#).unwrap();
//! assert_eq!(config.analyzer, AnalyzerKind::Whitespace);
//! assert!(config.commit_on_close);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::AnalyzerKind;
use crate::error::Result;

/// Settings for an [`Index`](crate::index::Index).
///
/// Missing keys in JSON take their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Analyzer applied to tokenized fields and to parsed queries.
    pub analyzer: AnalyzerKind,

    /// Commit pending changes when a writer is closed or dropped. When off,
    /// they are discarded instead.
    pub commit_on_close: bool,

    /// Sync storage after every commit.
    pub sync_on_commit: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            analyzer: AnalyzerKind::Simple,
            commit_on_close: true,
            sync_on_commit: true,
        }
    }
}

impl IndexConfig {
    /// Parse a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LucernaError;

    #[test]
    fn test_defaults() {
        let config = IndexConfig::default();
        assert_eq!(config.analyzer, AnalyzerKind::Simple);
        assert!(config.commit_on_close);
        assert!(config.sync_on_commit);

        assert_eq!(IndexConfig::from_json_str("{}").unwrap(), config);
    }

    #[test]
    fn test_json_round_trip() {
        let config = IndexConfig {
            analyzer: AnalyzerKind::Keyword,
            commit_on_close: false,
            sync_on_commit: false,
        };
        let json = config.to_json().unwrap();
        assert_eq!(IndexConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_bad_json() {
        let err = IndexConfig::from_json_str(r#"{"analyzer": "stemming"}"#).unwrap_err();
        assert!(matches!(err, LucernaError::Json(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.json");
        fs::write(&path, r#"{"sync_on_commit": false}"#).unwrap();

        let config = IndexConfig::from_json_file(&path).unwrap();
        assert!(!config.sync_on_commit);
        assert!(IndexConfig::from_json_file(dir.path().join("missing.json")).is_err());
    }
}
