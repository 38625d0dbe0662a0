//! Ingestion orchestrator
//!
//! Drives every catalog item through the same steps, one item at a time and in
//! catalog order:
//!
//! ```text
//! start ──exists──▶ Skipped
//!   │
//!   └─absent──▶ insert ──success──▶ Inserted
//!                  └────failure──▶ Failed
//! ```
//!
//! Any error while handling an item (lookup or insert) ends that item as
//! `Failed` and the run moves on to the next one.

use crate::catalog::{Catalog, RoadmapItem};
use crate::error::{IngestError, Result};
use crate::existence;
use crate::report::{IngestionOutcome, IngestionReport, UNKNOWN_RECORD_ID};
use crate::reporter::{self, PreviewLine};
use crate::store::{RemoteStore, Table, WriteOperation};
use chrono::{DateTime, Utc};
use tracing::{info_span, Instrument};
use uuid::Uuid;

/// Detail recorded when the write proxy fails without saying why
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Runs the insert-if-absent pipeline against a store
pub struct Orchestrator<S> {
    store: S,
}

impl<S: RemoteStore> Orchestrator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Ingest every item of `catalog`, timestamping the report with the current time
    pub async fn run(&self, catalog: &Catalog) -> IngestionReport {
        self.run_at(catalog, Utc::now()).await
    }

    /// Ingest every item of `catalog` into a report stamped `timestamp`
    pub async fn run_at(&self, catalog: &Catalog, timestamp: DateTime<Utc>) -> IngestionReport {
        let span = info_span!("ingest_run", run_id = %Uuid::new_v4(), items = catalog.len());

        async {
            let mut report = IngestionReport::new(timestamp);
            for item in catalog {
                report.record(self.ingest_item(item).await);
            }
            report
        }
        .instrument(span)
        .await
    }

    /// Resolve a single item to its terminal outcome
    pub async fn ingest_item(&self, item: &RoadmapItem) -> IngestionOutcome {
        let span = info_span!("item", item = %item.name);

        async {
            reporter::item_started(item);

            let outcome = match self.try_ingest_item(item).await {
                Ok(outcome) => outcome,
                Err(err) => IngestionOutcome::Failed {
                    name: item.name.clone(),
                    error: failure_detail(err),
                },
            };

            reporter::item_resolved(&outcome);
            outcome
        }
        .instrument(span)
        .await
    }

    async fn try_ingest_item(&self, item: &RoadmapItem) -> Result<IngestionOutcome> {
        let existing = existence::exists(&self.store, &item.name).await?;
        if existing.found {
            return Ok(IngestionOutcome::Skipped {
                name: item.name.clone(),
                existing_ids: existing.record_ids,
            });
        }

        let data = serde_json::to_value(item)
            .map_err(|e| IngestError::unexpected(format!("cannot encode item: {}", e)))?;

        let response = self
            .store
            .write(Table::Projects, WriteOperation::Insert, &data)
            .await?;

        if !response.success {
            return Err(IngestError::store(
                response.error.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            ));
        }

        Ok(IngestionOutcome::Inserted {
            name: item.name.clone(),
            record_id: response
                .first_record_id()
                .unwrap_or_else(|| UNKNOWN_RECORD_ID.to_string()),
        })
    }
}

/// Dry-run listing of `catalog`; touches no store
pub fn preview(catalog: &Catalog) -> Vec<PreviewLine> {
    catalog.iter().map(PreviewLine::from).collect()
}

fn failure_detail(err: IngestError) -> String {
    if err.is_item_scoped() {
        err.to_string()
    } else {
        IngestError::unexpected(err.to_string()).to_string()
    }
}
