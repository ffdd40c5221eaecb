//! Error types for persistence and configuration
//!
//! Loads never fail; these errors only come out of saves, deletes and
//! config parsing.

use std::path::PathBuf;

use taskboard_core::ModelError;

/// Storage error type
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// IO error writing the document
    #[error("io error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document could not be encoded
    #[error("failed to encode document: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Another stored user already has this email
    #[error("the email '{0}' is already registered")]
    DuplicateEmail(String),

    /// Document failed the shape check before writing
    #[error("refusing to write malformed document: {0}")]
    InvalidDocument(&'static str),

    /// Entity could not be converted to a record
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl StorageError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Check if error is a validation failure the caller can correct
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        match self {
            Self::DuplicateEmail(_) | Self::InvalidDocument(_) => true,
            Self::Model(err) => err.is_input_error(),
            Self::Io { .. } | Self::Serialize(_) => false,
        }
    }
}

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_email_is_validation() {
        let err = StorageError::DuplicateEmail("ana@x.com".into());
        assert!(err.is_validation());
        assert!(err.to_string().contains("ana@x.com"));
    }

    #[test]
    fn io_is_not_validation() {
        let err = StorageError::io_error(
            "data/projects.json",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_validation());
        assert!(err.to_string().contains("projects.json"));
    }

    #[test]
    fn model_errors_convert() {
        let err: StorageError = ModelError::EmptySearchTerm.into();
        assert!(err.is_validation());
    }
}
