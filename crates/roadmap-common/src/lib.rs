//! Roadmap Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared plumbing for the roadmap workspace members:
//!
//! - **Logging**: `tracing` subscriber setup driven by [`logging::LogConfig`]
//! - **Artifacts**: write-once, timestamped JSON result files
//! - **Errors**: [`CommonError`] and its [`Result`] alias

pub mod artifact;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{CommonError, Result};
