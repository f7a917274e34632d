//! Catalog error types
//!
//! The core never prints. Every failure surfaces to the caller of the
//! top-level transform as a [`CatalogError`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while handling a catalog or its settings file
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The input document does not exist
    #[error("Catalog source not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// The input document exists but could not be read
    #[error("Failed to read catalog source {path}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document could not be turned into a catalog tree
    #[error("Malformed catalog document ({origin}): {reason}")]
    MalformedDocument { origin: String, reason: String },

    /// The page reorder produced a child list of a different length
    #[error(
        "Page reordering changed the child count of book {book}: expected {expected}, got {actual}"
    )]
    ReconstructionInvariantViolation {
        book: String,
        expected: usize,
        actual: usize,
    },

    /// The transformed document could not be written
    #[error("Failed to write catalog to {path}")]
    DestinationWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog tree could not be emitted as YAML
    #[error("Failed to serialize catalog")]
    Serialize {
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// An explicitly requested config file does not exist
    #[error("Config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// The config file exists but could not be read
    #[error("Failed to read config file {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid settings YAML
    #[error("Invalid config file ({origin}): {reason}")]
    ConfigInvalid { origin: String, reason: String },
}

impl CatalogError {
    /// Short, stable name of the error kind for user-facing reports
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogError::SourceNotFound { .. } | CatalogError::SourceRead { .. } => {
                "SourceNotFound"
            }
            CatalogError::MalformedDocument { .. } => "MalformedDocument",
            CatalogError::ReconstructionInvariantViolation { .. } => {
                "ReconstructionInvariantViolation"
            }
            CatalogError::DestinationWriteFailure { .. } | CatalogError::Serialize { .. } => {
                "DestinationWriteFailure"
            }
            CatalogError::ConfigNotFound { .. }
            | CatalogError::ConfigRead { .. }
            | CatalogError::ConfigInvalid { .. } => "ConfigError",
        }
    }

    pub(crate) fn malformed(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        CatalogError::MalformedDocument {
            origin: origin.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
