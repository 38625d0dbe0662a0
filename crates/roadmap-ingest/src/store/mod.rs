//! Remote store access
//!
//! The store is reachable only through two JSON proxy endpoints: a read proxy
//! that runs filtered, ordered selects and a write proxy that inserts records.
//! [`RemoteStore`] is the seam the orchestrator depends on; [`StoreClient`] is
//! the HTTP implementation.

pub mod client;
pub mod types;

pub use client::StoreClient;
pub use types::*;

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// The two operations the ingestion pipeline needs from the store
///
/// Implementations make exactly one attempt per call. Retrying is left to
/// callers.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Select records from `table` matching every filter, in the given order
    async fn read(&self, table: Table, filters: &[Filter], order_by: &[OrderBy])
        -> Result<ReadResponse>;

    /// Apply `operation` to `table` with the given record
    async fn write(&self, table: Table, operation: WriteOperation, data: &Value)
        -> Result<WriteResponse>;
}
