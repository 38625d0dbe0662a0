//! In-memory store for orchestrator tests
//!
//! [`MemoryStore`] answers name lookups from the records it holds and appends
//! every successful insert, so repeated runs observe earlier writes. Individual
//! names can be scripted to fail in specific ways.

use crate::error::{IngestError, Result};
use crate::store::{
    Filter, FilterOperator, OrderBy, ReadResponse, RemoteStore, Table, WriteOperation,
    WriteResponse,
};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

/// Scripted behaviour of a lookup for one name
#[derive(Debug, Clone)]
pub enum ScriptedRead {
    /// `{success: false, error}`
    Rejected(String),
    HttpStatus(u16),
    Unreachable,
}

/// Scripted behaviour of an insert for one name
#[derive(Debug, Clone)]
pub enum ScriptedWrite {
    /// `{success: true}` with the given id, or no `recordIds` at all
    Succeed(Option<String>),
    /// `{success: false}` with the given error, if any
    Rejected(Option<String>),
    HttpStatus(u16),
    Unreachable,
}

/// A read as the store received it
#[derive(Debug, Clone)]
pub struct RecordedRead {
    pub table: Table,
    pub filters: Vec<Filter>,
    pub order_by: Vec<OrderBy>,
}

#[derive(Default)]
struct State {
    records: Vec<Value>,
    next_id: u32,
    reads: Vec<RecordedRead>,
    writes: Vec<Value>,
    read_scripts: HashMap<String, ScriptedRead>,
    write_scripts: HashMap<String, ScriptedWrite>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Value>) -> Self {
        let store = Self::new();
        store.lock().records = records;
        store
    }

    pub fn script_read(&self, name: &str, script: ScriptedRead) {
        self.lock().read_scripts.insert(name.to_string(), script);
    }

    pub fn script_write(&self, name: &str, script: ScriptedWrite) {
        self.lock().write_scripts.insert(name.to_string(), script);
    }

    pub fn reads(&self) -> Vec<RecordedRead> {
        self.lock().reads.clone()
    }

    /// Every record passed to `write`, in call order
    pub fn writes(&self) -> Vec<Value> {
        self.lock().writes.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// A genuine `reqwest` error, produced without touching the network
fn transport_error(url: &str) -> IngestError {
    let source = match reqwest::Client::new().get("http://[::1").build() {
        Err(e) => e,
        Ok(_) => unreachable!("malformed URL must not build"),
    };
    IngestError::Transport {
        url: url.to_string(),
        source,
    }
}

fn http_error(url: &str, status: u16) -> IngestError {
    IngestError::HttpStatus {
        url: url.to_string(),
        status,
        body: String::new(),
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn read(
        &self,
        table: Table,
        filters: &[Filter],
        order_by: &[OrderBy],
    ) -> Result<ReadResponse> {
        let mut state = self.lock();
        state.reads.push(RecordedRead {
            table,
            filters: filters.to_vec(),
            order_by: order_by.to_vec(),
        });

        let name = filters
            .iter()
            .find(|f| f.column == "name" && f.operator == FilterOperator::Eq)
            .and_then(|f| f.value.as_str())
            .unwrap_or_default()
            .to_string();

        match state.read_scripts.get(&name) {
            Some(ScriptedRead::Rejected(error)) => {
                return Ok(ReadResponse {
                    data: None,
                    success: Some(false),
                    error: Some(error.clone()),
                })
            },
            Some(ScriptedRead::HttpStatus(status)) => {
                return Err(http_error("memory://read", *status))
            },
            Some(ScriptedRead::Unreachable) => return Err(transport_error("memory://read")),
            None => {},
        }

        let matches = state
            .records
            .iter()
            .filter(|record| record.get("name").and_then(Value::as_str) == Some(name.as_str()))
            .cloned()
            .collect();

        Ok(ReadResponse {
            data: Some(matches),
            success: None,
            error: None,
        })
    }

    async fn write(
        &self,
        _table: Table,
        _operation: WriteOperation,
        data: &Value,
    ) -> Result<WriteResponse> {
        let mut state = self.lock();
        state.writes.push(data.clone());

        let name = data
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let assigned_id = match state.write_scripts.get(&name).cloned() {
            Some(ScriptedWrite::Rejected(error)) => {
                return Ok(WriteResponse {
                    success: false,
                    record_ids: None,
                    error,
                })
            },
            Some(ScriptedWrite::HttpStatus(status)) => {
                return Err(http_error("memory://write", status))
            },
            Some(ScriptedWrite::Unreachable) => return Err(transport_error("memory://write")),
            Some(ScriptedWrite::Succeed(id)) => id,
            None => {
                state.next_id += 1;
                Some(format!("rec-{}", state.next_id))
            },
        };

        let mut record = data.clone();
        if let (Some(id), Value::Object(fields)) = (&assigned_id, &mut record) {
            fields.insert("id".to_string(), json!(id));
        }
        state.records.push(record);

        Ok(WriteResponse {
            success: true,
            record_ids: assigned_id.map(|id| vec![json!(id)]),
            error: None,
        })
    }
}
