//! Error types shared by roadmap crates

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for common operations
pub type Result<T> = std::result::Result<T, CommonError>;

/// Errors raised by the shared utilities
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Artifact directory '{0}' does not exist or is not a directory")]
    ArtifactDir(PathBuf),

    #[error("Could not find a free artifact name for '{0}' after {1} attempts")]
    ArtifactNameExhausted(String, u32),
}
