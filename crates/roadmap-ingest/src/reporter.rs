//! Run reporting
//!
//! Progress and summary lines go through `tracing` so they share the
//! timestamped format of every other log line. The structured report is
//! persisted once per run as a fresh JSON artifact.

use crate::catalog::RoadmapItem;
use crate::error::Result;
use crate::report::{IngestionOutcome, IngestionReport, Summary};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// File name prefix of persisted run reports
pub const RESULTS_PREFIX: &str = "ingestion_results";

const RULE: &str = "======================================================================";

/// One dry-run listing entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewLine {
    pub glyph: &'static str,
    pub phase: String,
    pub name: String,
}

impl From<&RoadmapItem> for PreviewLine {
    fn from(item: &RoadmapItem) -> Self {
        Self {
            glyph: item.status.glyph(),
            phase: item.phase().to_string(),
            name: item.name.clone(),
        }
    }
}

impl std::fmt::Display for PreviewLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.glyph, self.phase, self.name)
    }
}

/// Log the run header
pub fn banner(dry_run: bool, item_count: usize) {
    info!("{}", RULE);
    info!("ROADMAP INGESTION v1.2");
    info!("{}", RULE);
    if dry_run {
        info!("🔍 DRY RUN MODE - No data will be written");
    }
    info!(items = item_count, "📋 Prepared {} roadmap items for ingestion", item_count);
}

pub fn item_started(item: &RoadmapItem) {
    info!(item = %item.name, "📝 Ingesting: {} ({})", item.name, item.phase());
}

pub fn item_resolved(outcome: &IngestionOutcome) {
    match outcome {
        IngestionOutcome::Inserted { name, record_id } => {
            info!(item = %name, record_id = %record_id, "  ✅ Inserted: {}", record_id);
        },
        IngestionOutcome::Skipped { name, existing_ids } => {
            info!(
                item = %name,
                existing = %existing_ids.join(","),
                "  ⏭️  Already exists, skipping..."
            );
        },
        IngestionOutcome::Failed { name, error } => {
            warn!(item = %name, error = %error, "  ❌ Failed: {}", error);
        },
    }
}

/// Log the dry-run listing
pub fn preview(lines: &[PreviewLine]) {
    info!("🔍 DRY RUN - Would ingest:");
    for line in lines {
        info!("  {}", line);
    }
}

/// Log the per-partition counts
pub fn summary(summary: &Summary) {
    info!("{}", RULE);
    info!("INGESTION SUMMARY");
    info!("{}", RULE);
    info!("✅ Success: {}", summary.success);
    info!("⏭️  Skipped: {}", summary.skipped);
    info!("❌ Failed:  {}", summary.failed);
}

/// Write `report` to a new artifact under `dir` and return its path
pub fn persist(report: &IngestionReport, dir: &Path) -> Result<PathBuf> {
    let path =
        roadmap_common::artifact::write_new_json(dir, RESULTS_PREFIX, report.timestamp(), report)?;
    info!(path = %path.display(), "📄 Results saved to: {}", path.display());
    Ok(path)
}
