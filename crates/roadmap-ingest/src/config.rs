//! Configuration for roadmap ingestion
//!
//! Every setting has a default, so a bare `roadmap-ingest` run needs no
//! environment at all. Values are read from the process environment after a
//! `.env` file (if any) has been loaded.

use crate::error::{IngestError, Result};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

// ============================================================================
// Configuration Constants
// ============================================================================

/// Default write proxy endpoint
pub const DEFAULT_WRITE_ENDPOINT: &str = "https://javariai.com/api/javari/supabase/write";

/// Default read proxy endpoint
pub const DEFAULT_READ_ENDPOINT: &str = "https://javariai.com/api/javari/supabase/read";

/// Default directory for result artifacts
pub const DEFAULT_RESULTS_DIR: &str = ".";

/// Ingestion settings
#[derive(Debug, Clone)]
pub struct Config {
    /// Write proxy URL
    pub write_endpoint: Url,

    /// Read proxy URL
    pub read_endpoint: Url,

    /// Directory the results artifact is written into
    pub results_dir: PathBuf,

    /// JSON catalog file; the built-in catalog is used when unset
    pub catalog_path: Option<PathBuf>,

    /// Per-request timeout; the HTTP client default applies when unset
    pub request_timeout: Option<Duration>,
}

impl Config {
    /// Build a config for explicit endpoints, everything else defaulted
    pub fn new(write_endpoint: &str, read_endpoint: &str) -> Result<Self> {
        Ok(Self {
            write_endpoint: parse_endpoint("write", write_endpoint)?,
            read_endpoint: parse_endpoint("read", read_endpoint)?,
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            catalog_path: None,
            request_timeout: None,
        })
    }

    /// Load config from environment variables
    ///
    /// - `ROADMAP_WRITE_ENDPOINT`
    /// - `ROADMAP_READ_ENDPOINT`
    /// - `ROADMAP_RESULTS_DIR`
    /// - `ROADMAP_CATALOG_PATH`
    /// - `ROADMAP_API_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        // A missing .env file is normal
        let _ = dotenvy::dotenv();

        let write = env_or("ROADMAP_WRITE_ENDPOINT", DEFAULT_WRITE_ENDPOINT);
        let read = env_or("ROADMAP_READ_ENDPOINT", DEFAULT_READ_ENDPOINT);
        let mut config = Self::new(&write, &read)?;

        if let Ok(dir) = std::env::var("ROADMAP_RESULTS_DIR") {
            config.results_dir = PathBuf::from(dir);
        }

        if let Ok(path) = std::env::var("ROADMAP_CATALOG_PATH") {
            config.catalog_path = Some(PathBuf::from(path));
        }

        if let Ok(secs) = std::env::var("ROADMAP_API_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                IngestError::config(format!(
                    "ROADMAP_API_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    secs
                ))
            })?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_endpoint(kind: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| IngestError::config(format!("invalid {} endpoint '{}': {}", kind, raw, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(IngestError::config(format!(
            "{} endpoint must use http or https, got '{}'",
            kind, other
        ))),
    }
}
