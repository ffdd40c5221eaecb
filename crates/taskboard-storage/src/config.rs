//! Storage configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default location of the document, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "data/projects.json";

/// Storage configuration
///
/// Loaded from TOML; every field is optional:
///
/// ```toml
/// data_file = "boards/work.json"
/// pretty = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the JSON document
    pub data_file: PathBuf,
    /// Indent the written JSON
    pub pretty: bool,
}

impl StorageConfig {
    /// Create default config
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With data file
    #[inline]
    #[must_use]
    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    /// With pretty printing
    #[inline]
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Parse config from TOML text
    ///
    /// # Errors
    /// Returns the TOML error if the text does not match the schema
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load config from a TOML file
    ///
    /// # Errors
    /// - `ConfigError::Io` if the file cannot be read
    /// - `ConfigError::Parse` if it is not valid config TOML
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), data_file = %config.data_file.display(), "config loaded");
        Ok(config)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            pretty: true,
        }
    }
}
