//! Error types
//!
//! `TreeError` covers decoding and building trees; `ApiError` is what the
//! CLI and configuration layers surface.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while turning JSON input into a tree
#[derive(Debug, Error)]
pub enum TreeError {
    /// Input bytes are not valid JSON; carries the decoder's error unchanged
    #[error("failed to decode JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("document nesting exceeds the configured limit of {limit}")]
    DepthLimitExceeded { limit: usize },

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors surfaced at the API/CLI boundary
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
