//! Error types for the storage layer

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::codec::CodecError;

/// Result type used throughout the storage layer
pub type Result<T, E = StoreError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database already exists at {}", root.display())]
    AlreadyExists { root: PathBuf },

    #[error("missing collection - no place to save record")]
    MissingCollection,

    #[error("missing resource - unable to save record")]
    MissingResource,

    #[error("invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("{}: not found", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to {op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode or decode {}: {source}", path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl StoreError {
    /// Wraps an I/O error, classifying absence as [`StoreError::NotFound`]
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            StoreError::NotFound { path, source }
        } else {
            StoreError::Io { op, path, source }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, StoreError::AlreadyExists { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn io_classifies_not_found() {
        let err = StoreError::io(
            "read",
            "db/fish/red.json",
            io::Error::from(io::ErrorKind::NotFound),
        );
        assert!(err.is_not_found());
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "db/fish/red.json: not found");
    }

    #[test]
    fn io_keeps_other_failures() {
        let err = StoreError::io(
            "rename",
            "db/fish/red.json",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, StoreError::Io { op: "rename", .. }));
        assert!(!err.is_not_found());
    }

    #[test]
    fn already_exists_message() {
        let err = StoreError::AlreadyExists {
            root: PathBuf::from("testdata/school"),
        };
        assert!(err.is_already_exists());
        assert_eq!(err.to_string(), "database already exists at testdata/school");
    }

    #[test]
    fn decode_failure_message_is_direction_neutral() {
        let source = serde_json::from_str::<u32>("{").unwrap_err();
        let err = StoreError::Serialization {
            path: PathBuf::from("db/fish/bad.json"),
            source: CodecError::Json(source),
        };
        let message = err.to_string();
        assert!(message.starts_with("failed to encode or decode db/fish/bad.json: "));
        assert!(!message.contains("serialize"));
    }
}
