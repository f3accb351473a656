//! Error types for document regeneration.
//!
//! Covers every failure mode of the pipeline: file I/O, extraction, recovery
//! of hand-written content and configuration.

use std::path::PathBuf;

use slashdoc_extract::ExtractError;
use thiserror::Error;

/// Errors that can occur while regenerating a document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// File I/O failure.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The command source could not be extracted.
    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),

    /// The old document names a command that the source no longer declares.
    #[error("document references unknown command '/{command}' in group '{group}'")]
    UnknownCommand { group: String, command: String },

    /// Configuration value rejected.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RenderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for results with [`RenderError`].
pub type Result<T> = std::result::Result<T, RenderError>;
