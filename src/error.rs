//! Error types for the tile index.

use thiserror::Error;

/// Errors surfaced by index construction and path-based queries.
///
/// Projection and tile addressing are total functions and never produce an
/// error; out-of-range coordinates are clamped instead.
#[derive(Debug, Error)]
pub enum IndexError {
    /// A tile path contains a character outside `'0'..='3'`.
    #[error("invalid tile path {path:?}: unexpected {found:?} at position {position}")]
    InvalidPath {
        path: String,
        position: usize,
        found: char,
    },

    /// A dataset record cannot be placed in the index. Fatal to the build.
    #[error("dataset record #{index} is invalid: {reason}")]
    DatasetRecordInvalid { index: usize, reason: String },

    /// The index configuration failed validation.
    #[error("invalid index configuration: {0}")]
    InvalidConfig(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[cfg(feature = "toml")]
    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[cfg(feature = "toml")]
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl IndexError {
    /// Whether the error was caused by a malformed tile path.
    pub fn is_invalid_path(&self) -> bool {
        matches!(self, Self::InvalidPath { .. })
    }
}

pub type Result<T> = std::result::Result<T, IndexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_path_display() {
        let err = IndexError::InvalidPath {
            path: "01x".to_string(),
            position: 2,
            found: 'x',
        };
        assert!(err.is_invalid_path());
        assert_eq!(
            err.to_string(),
            "invalid tile path \"01x\": unexpected 'x' at position 2"
        );
    }

    #[test]
    fn test_dataset_record_display() {
        let err = IndexError::DatasetRecordInvalid {
            index: 7,
            reason: "missing latitude".to_string(),
        };
        assert!(!err.is_invalid_path());
        assert_eq!(
            err.to_string(),
            "dataset record #7 is invalid: missing latitude"
        );
    }
}
