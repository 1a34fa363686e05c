// Scan configuration, loaded from JSON.
//
// Every field has a default, so `{}` is a valid config and a config file only
// needs the fields it changes. Follows the same JSON-string-in, typed-struct-out
// pattern as the dictionary and catalog loaders.
//
// Fields:
// - `comment_marker`: dictionary lines starting with this are skipped
// - `wildcard`: catalog rhyme label that matches any rhyme group
// - `empty_words`: what normalization does with punctuation-only tokens
// - `strict_rhymes`: whether lines with different pattern labels are
//   forbidden from sharing a rhyme group

use std::path::Path;

use serde::{Deserialize, Serialize};
use stanza_prosody::EmptyWordPolicy;

use crate::error::ScanResult;

/// Comment marker used by the CMU Pronouncing Dictionary.
pub const DEFAULT_COMMENT_MARKER: &str = ";;;";

/// Rhyme label that matches any rhyme group.
pub const DEFAULT_WILDCARD: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub comment_marker: String,
    pub wildcard: String,
    pub empty_words: EmptyWordPolicy,
    pub strict_rhymes: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            comment_marker: DEFAULT_COMMENT_MARKER.to_string(),
            wildcard: DEFAULT_WILDCARD.to_string(),
            empty_words: EmptyWordPolicy::Drop,
            strict_rhymes: true,
        }
    }
}

impl ScanConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a config from a JSON file.
    pub fn load(path: &Path) -> ScanResult<Self> {
        let json = crate::read_text(path)?;
        Ok(Self::from_json(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = ScanConfig::from_json("{}").unwrap();
        assert_eq!(config, ScanConfig::default());
        assert_eq!(config.comment_marker, ";;;");
        assert_eq!(config.wildcard, "*");
        assert_eq!(config.empty_words, EmptyWordPolicy::Drop);
        assert!(config.strict_rhymes);
    }

    #[test]
    fn test_partial_override() {
        let config =
            ScanConfig::from_json(r#"{"empty_words": "reject", "strict_rhymes": false}"#).unwrap();
        assert_eq!(config.empty_words, EmptyWordPolicy::Reject);
        assert!(!config.strict_rhymes);
        assert_eq!(config.wildcard, "*");
    }

    #[test]
    fn test_invalid_policy_rejected() {
        assert!(ScanConfig::from_json(r#"{"empty_words": "ignore"}"#).is_err());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = ScanConfig {
            wildcard: "-".into(),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(ScanConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ScanConfig::load(Path::new("/nonexistent/scan.json")).unwrap_err();
        assert!(matches!(err, crate::ScanError::Io { .. }));
    }
}
