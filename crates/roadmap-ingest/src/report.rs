//! Per-item outcomes and the run report

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// Record id reported when the write proxy succeeds without returning ids
pub const UNKNOWN_RECORD_ID: &str = "unknown";

/// Terminal state of one roadmap item in a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestionOutcome {
    Inserted { name: String, record_id: String },
    /// `existing_ids` are the ids of the records that already carry the name
    Skipped { name: String, existing_ids: Vec<String> },
    Failed { name: String, error: String },
}

/// An inserted item as persisted in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsertedEntry {
    pub name: String,
    pub id: String,
}

/// A failed item as persisted in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedEntry {
    pub name: String,
    pub error: String,
}

/// Outcomes of a completed run, partitioned by kind in catalog order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestionReport {
    success: Vec<InsertedEntry>,
    failed: Vec<FailedEntry>,
    skipped: Vec<String>,
    #[serde(serialize_with = "serialize_rfc3339")]
    timestamp: DateTime<Utc>,
}

impl IngestionReport {
    /// An empty report for a run started at `timestamp`
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            success: Vec::new(),
            failed: Vec::new(),
            skipped: Vec::new(),
            timestamp,
        }
    }

    /// Add `outcome` to its partition
    pub fn record(&mut self, outcome: IngestionOutcome) {
        match outcome {
            IngestionOutcome::Inserted { name, record_id } => {
                self.success.push(InsertedEntry { name, id: record_id })
            },
            IngestionOutcome::Skipped { name, .. } => self.skipped.push(name),
            IngestionOutcome::Failed { name, error } => {
                self.failed.push(FailedEntry { name, error })
            },
        }
    }

    pub fn success(&self) -> &[InsertedEntry] {
        &self.success
    }

    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn failed(&self) -> &[FailedEntry] {
        &self.failed
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Number of outcomes recorded
    pub fn len(&self) -> usize {
        self.success.len() + self.skipped.len() + self.failed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn summary(&self) -> Summary {
        Summary {
            success: self.success.len(),
            skipped: self.skipped.len(),
            failed: self.failed.len(),
        }
    }
}

fn serialize_rfc3339<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Micros, false))
}

/// Partition counts of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub success: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Summary {
    /// Process exit code for a run with these counts
    pub fn exit_code(&self) -> i32 {
        if self.failed > 0 {
            1
        } else {
            0
        }
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "success={}, skipped={}, failed={}",
            self.success, self.skipped, self.failed
        )
    }
}
