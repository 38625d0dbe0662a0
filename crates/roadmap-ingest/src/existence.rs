//! Name-based existence check
//!
//! This is the idempotency gate: an item is inserted only when no record with
//! the same name is already in `projects`. The check and the later insert are
//! two separate proxy calls, so concurrent runs can both see "absent" and both
//! insert. Runs are not serialized against each other.

use crate::error::{IngestError, Result};
use crate::store::{id_to_string, Filter, OrderBy, RemoteStore, Table};
use tracing::debug;

/// Column holding the item name
pub const NAME_COLUMN: &str = "name";

/// Column the lookup is ordered by, newest first
pub const CREATED_AT_COLUMN: &str = "created_at";

/// Outcome of looking an item up by name
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExistenceResult {
    pub found: bool,
    /// `id` of every matching record that carried one
    pub record_ids: Vec<String>,
}

/// Look up records in `projects` whose name equals `name`
pub async fn exists<S: RemoteStore + ?Sized>(store: &S, name: &str) -> Result<ExistenceResult> {
    let filters = [Filter::eq(NAME_COLUMN, name)];
    let order_by = [OrderBy::desc(CREATED_AT_COLUMN)];

    let response = store.read(Table::Projects, &filters, &order_by).await?;

    if response.is_rejected() {
        return Err(IngestError::store(
            response
                .error
                .unwrap_or_else(|| "read proxy rejected the existence query".to_string()),
        ));
    }

    let records = response.records();
    let record_ids = records
        .iter()
        .filter_map(|record| record.get("id").and_then(id_to_string))
        .collect();

    debug!(item = name, matches = records.len(), "Existence check complete");

    Ok(ExistenceResult {
        found: !records.is_empty(),
        record_ids,
    })
}
