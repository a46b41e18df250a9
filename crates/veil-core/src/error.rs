//! Error types for veil-core

use std::path::PathBuf;

use thiserror::Error;

use crate::artifact::ArtifactKeyError;

/// Core error type for exclusion-engine operations
#[derive(Debug, Error)]
pub enum Error {
    /// An exclusion entry's artifact coordinates failed validation
    #[error("invalid artifact coordinates `{coordinates}` in exclusion config: {source}")]
    Coordinates {
        /// The offending table key
        coordinates: String,
        /// Underlying coordinate error
        #[source]
        source: ArtifactKeyError,
    },

    /// A path claimed to be a class file does not carry the `.class` suffix.
    ///
    /// This is a contract violation by the caller, never a recoverable
    /// runtime condition: silently mis-converting the name would produce
    /// incorrect filtering rather than merely incomplete filtering.
    #[error("`{path}` is not a valid class file name: it does not end with `.class`")]
    NotAClassFile {
        /// The offending path
        path: String,
    },

    /// Invalid exclusion configuration (bad pattern, empty entry, bad env value)
    #[error("invalid exclusion config: {0}")]
    InvalidConfig(String),

    /// Exclusion config file could not be read
    #[error("failed to read exclusion config {path}: {source}")]
    ConfigRead {
        /// Path that failed to read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Exclusion config file is not valid TOML
    #[error("failed to parse exclusion config {path}: {source}")]
    ConfigParse {
        /// Path that failed to parse
        path: PathBuf,
        /// Underlying TOML error
        #[source]
        source: toml::de::Error,
    },

    /// Class-pattern regex failed to compile
    #[error("invalid class pattern `{pattern}` for artifact `{coordinates}`: {source}")]
    Pattern {
        /// Coordinates of the entry declaring the pattern
        coordinates: String,
        /// The pattern that failed to compile
        pattern: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },

    /// File watcher setup failure
    #[error("file watcher error: {0}")]
    Watch(#[from] notify::Error),
}

impl Error {
    /// Create an `InvalidConfig` error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a `NotAClassFile` error
    pub fn not_a_class_file(path: impl Into<String>) -> Self {
        Self::NotAClassFile { path: path.into() }
    }
}

/// Result type alias for veil-core operations
pub type Result<T> = std::result::Result<T, Error>;
