//! Roadmap Ingest - Main entry point

use anyhow::{Context, Result};
use roadmap_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use roadmap_ingest::catalog::Catalog;
use roadmap_ingest::config::Config;
use roadmap_ingest::orchestrator::{self, Orchestrator};
use roadmap_ingest::reporter;
use roadmap_ingest::store::StoreClient;
use roadmap_ingest::Cli;
use clap::Parser;
use std::process;
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let defaults = LogConfig::builder()
        .level(LogLevel::Info)
        .output(LogOutput::Console)
        .log_file_prefix("roadmap-ingest")
        .filter_directives("reqwest=warn,hyper=warn,hyper_util=warn")
        .build();

    // Environment variables take precedence
    let log_config = match defaults.clone().merge_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: ignoring LOG_* environment: {:#}", e);
            defaults.clone()
        },
    };

    // Progress and summary must stay visible, so a rejected config falls back to defaults
    let guard = init_logging(&log_config)
        .or_else(|e| {
            eprintln!("Warning: logging setup failed, using defaults: {:#}", e);
            init_logging(&defaults)
        })
        .map_err(|e| eprintln!("Warning: logging disabled: {:#}", e))
        .ok();

    let code = match execute(&cli).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %format!("{:#}", e), "❌ FATAL ERROR: {:#}", e);
            eprintln!("Error: {:#}", e);
            1
        },
    };

    // process::exit skips destructors; flush file logs first
    drop(guard);
    process::exit(code);
}

/// Run one ingestion (or dry run) and return the process exit code
async fn execute(cli: &Cli) -> Result<i32> {
    let config = Config::from_env().context("Failed to load configuration")?;
    let catalog =
        Catalog::load(config.catalog_path.as_deref()).context("Failed to load roadmap catalog")?;

    reporter::banner(cli.dry_run, catalog.len());

    if cli.dry_run {
        reporter::preview(&orchestrator::preview(&catalog));
        return Ok(0);
    }

    let store = StoreClient::new(&config).context("Failed to create store client")?;
    let orchestrator = Orchestrator::new(store);
    let report = orchestrator.run(&catalog).await;
    let summary = report.summary();

    reporter::summary(&summary);
    reporter::persist(&report, &config.results_dir).with_context(|| {
        format!("Failed to save results to {}", config.results_dir.display())
    })?;

    Ok(summary.exit_code())
}
