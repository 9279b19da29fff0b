//! Error types for the soft sensor pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Pipeline result type alias.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Failures that abort a run. Invalid sensor data is not an error; it is
/// reported through the prediction status instead.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Directory creation or file access failed.
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Settings file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl PipelineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }
}
