//! Roadmap Ingest Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Loads a roadmap catalog into the remote `projects` table through the store's
//! read and write proxies, inserting only items whose name is not already
//! present.
//!
//! # Overview
//!
//! - **Store**: HTTP client for the two proxy endpoints ([`store`])
//! - **Existence check**: name lookup that gates every insert ([`existence`])
//! - **Orchestrator**: sequential per-item pipeline with failure isolation
//!   ([`orchestrator`])
//! - **Reporting**: progress logging and the persisted results file
//!   ([`reporter`], [`report`])
//!
//! # Example
//!
//! ```no_run
//! use roadmap_ingest::{catalog::Catalog, config::Config, orchestrator::Orchestrator};
//! use roadmap_ingest::store::StoreClient;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> roadmap_ingest::Result<()> {
//!     let config = Config::from_env()?;
//!     let catalog = Catalog::load(None)?;
//!     let orchestrator = Orchestrator::new(StoreClient::new(&config)?);
//!
//!     let report = orchestrator.run(&catalog).await;
//!     println!("{}", report.summary());
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod existence;
pub mod orchestrator;
pub mod report;
pub mod reporter;
pub mod store;

#[cfg(test)]
mod test_helpers;

// Re-export commonly used types
pub use error::{IngestError, Result};

use clap::Parser;

/// Roadmap ingestion: insert catalog items that are not yet in the store
#[derive(Parser, Debug)]
#[command(name = "roadmap-ingest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// List what would be ingested without contacting the store
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags() {
        assert!(!Cli::try_parse_from(["roadmap-ingest"]).unwrap().dry_run);
        assert!(Cli::try_parse_from(["roadmap-ingest", "--dry-run"]).unwrap().dry_run);
        assert!(Cli::try_parse_from(["roadmap-ingest", "--force"]).is_err());
    }
}
