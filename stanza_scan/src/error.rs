// Error types for reading collaborator files and running scans.
//
// Parse errors carry 1-based line numbers so they can be matched against the
// source file in an editor. Core pipeline failures pass through unchanged as
// `ScanError::Prosody`.

use std::io;
use std::path::PathBuf;

use stanza_prosody::ProsodyError;
use thiserror::Error;

/// Result alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

#[derive(Debug, Error)]
pub enum ScanError {
    /// A poem, dictionary, catalog, or config file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A malformed pronouncing-dictionary record.
    #[error("dictionary line {line_number}: {reason}")]
    Dictionary { line_number: usize, reason: String },

    /// A malformed poetry-form catalog block.
    #[error("form catalog line {line_number}: {reason}")]
    Catalog { line_number: usize, reason: String },

    /// The JSON configuration could not be parsed.
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    /// The requested form is not in the catalog.
    #[error("unknown poetry form \"{0}\"")]
    UnknownForm(String),

    #[error(transparent)]
    Prosody(#[from] ProsodyError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = ScanError::Io {
            path: PathBuf::from("poems/missing.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "cannot read poems/missing.txt: not found");
    }

    #[test]
    fn test_parse_error_display() {
        let err = ScanError::Catalog {
            line_number: 4,
            reason: "expected a syllable count, found \"five\"".into(),
        };
        assert_eq!(
            err.to_string(),
            "form catalog line 4: expected a syllable count, found \"five\""
        );
    }

    #[test]
    fn test_prosody_error_is_transparent() {
        let err: ScanError = ProsodyError::EmptyLine { line: 3 }.into();
        assert_eq!(err.to_string(), "line 3 has no words");
        assert!(matches!(err, ScanError::Prosody(_)));
    }
}
