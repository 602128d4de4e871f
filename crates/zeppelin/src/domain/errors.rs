//! Domain Errors
//!
//! Error types for notebook conversion.

use std::path::PathBuf;

use thiserror::Error;

/// Conversion errors
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Invalid notebook JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unrecognized date: {0}")]
    InvalidDate(String),

    #[error("Image decode error: {0}")]
    ImageDecode(String),

    #[error("Image render error: {0}")]
    ImageRender(String),

    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl ConvertError {
    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
