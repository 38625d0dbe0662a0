//! Error types for roadmap ingestion
//!
//! Two layers of failure exist. Per-item errors ([`IngestError::Transport`],
//! [`IngestError::HttpStatus`], [`IngestError::Store`],
//! [`IngestError::Unexpected`]) are captured by the orchestrator and recorded as
//! a failed outcome for that item. Everything else is raised before or after
//! the item loop and ends the run.

use thiserror::Error;

/// Result type alias for ingestion operations
pub type Result<T> = std::result::Result<T, IngestError>;

/// Error type for ingestion operations
#[derive(Error, Debug)]
pub enum IngestError {
    /// The request never produced an HTTP response
    #[error("Transport error calling {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-2xx status
    #[error("HTTP error {status} from {url}: {body}")]
    HttpStatus {
        url: String,
        status: u16,
        body: String,
    },

    /// The store proxy reported `success: false`
    #[error("{0}")]
    Store(String),

    /// Anything else that went wrong while processing an item
    #[error("Unexpected error: {0}")]
    Unexpected(String),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check the ROADMAP_* environment variables.")]
    Config(String),

    /// The catalog could not be loaded or is inconsistent
    #[error("Invalid catalog: {0}")]
    Catalog(String),

    /// Persisting the run results failed
    #[error("Failed to persist results: {0}")]
    Artifact(#[from] roadmap_common::CommonError),
}

impl IngestError {
    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Create an unexpected error
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Whether this error is recorded against a single item rather than ending the run
    pub fn is_item_scoped(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::HttpStatus { .. } | Self::Store(_) | Self::Unexpected(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_message_is_verbatim() {
        assert_eq!(IngestError::store("dup").to_string(), "dup");
    }

    #[test]
    fn test_http_status_message() {
        let err = IngestError::HttpStatus {
            url: "http://store/read".to_string(),
            status: 503,
            body: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error 503 from http://store/read: unavailable");
        assert!(err.is_item_scoped());
    }

    #[test]
    fn test_run_scoped_errors() {
        assert!(!IngestError::catalog("duplicate name").is_item_scoped());
        assert!(!IngestError::config("bad url").is_item_scoped());
        assert!(IngestError::unexpected("boom").is_item_scoped());
    }
}
