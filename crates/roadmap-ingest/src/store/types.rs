//! Store proxy request and response types
//!
//! Matches the JSON contracts of the read and write proxies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tables the proxies accept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Table {
    Projects,
    Milestones,
}

impl Table {
    pub fn as_str(self) -> &'static str {
        match self {
            Table::Projects => "projects",
            Table::Milestones => "milestones",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Write proxy operations; only inserts are issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteOperation {
    Insert,
}

/// Comparison applied by a read filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    Ilike,
}

/// A single `{column, operator, value}` predicate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub column: String,
    pub operator: FilterOperator,
    pub value: Value,
}

impl Filter {
    /// Equality predicate on `column`
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            operator: FilterOperator::Eq,
            value: value.into(),
        }
    }
}

/// Sort direction for a read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// A single `{column, direction}` sort directive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: String,
    pub direction: SortDirection,
}

impl OrderBy {
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Body posted to the write proxy
#[derive(Debug, Serialize)]
pub struct WriteRequest<'a> {
    pub table: Table,
    pub operation: WriteOperation,
    pub data: &'a Value,
}

/// Body posted to the read proxy
#[derive(Debug, Serialize)]
pub struct ReadRequest<'a> {
    pub table: Table,
    pub filters: &'a [Filter],
    #[serde(rename = "orderBy")]
    pub order_by: &'a [OrderBy],
}

/// Write proxy response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WriteResponse {
    #[serde(default)]
    pub success: bool,

    /// Identifiers of the inserted records
    #[serde(default, rename = "recordIds", skip_serializing_if = "Option::is_none")]
    pub record_ids: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WriteResponse {
    /// First inserted record id rendered as text, if the proxy returned one
    pub fn first_record_id(&self) -> Option<String> {
        self.record_ids
            .as_deref()
            .and_then(|ids| ids.first())
            .and_then(id_to_string)
    }
}

/// Read proxy response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadResponse {
    #[serde(default)]
    pub data: Option<Vec<Value>>,

    /// Present when the proxy reports an application-level outcome
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReadResponse {
    /// Returned records; a missing or null `data` field reads as empty
    pub fn records(&self) -> &[Value] {
        self.data.as_deref().unwrap_or(&[])
    }

    /// Whether the proxy explicitly rejected the query
    pub fn is_rejected(&self) -> bool {
        self.success == Some(false)
    }
}

/// Render a record identifier; strings are kept verbatim, `null` is no id
pub fn id_to_string(id: &Value) -> Option<String> {
    match id {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_request_wire_shape() {
        let filters = [Filter::eq("name", "Telemetry Engine v1.0")];
        let order_by = [OrderBy::desc("created_at")];
        let request = ReadRequest {
            table: Table::Projects,
            filters: &filters,
            order_by: &order_by,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "table": "projects",
                "filters": [{"column": "name", "operator": "eq", "value": "Telemetry Engine v1.0"}],
                "orderBy": [{"column": "created_at", "direction": "desc"}]
            })
        );
    }

    #[test]
    fn test_write_request_wire_shape() {
        let data = json!({"name": "System Canon v1.0"});
        let request = WriteRequest {
            table: Table::Projects,
            operation: WriteOperation::Insert,
            data: &data,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "table": "projects",
                "operation": "insert",
                "data": {"name": "System Canon v1.0"}
            })
        );
    }

    #[test]
    fn test_write_response_record_ids() {
        let response: WriteResponse =
            serde_json::from_value(json!({"success": true, "recordIds": ["abc123", "def456"]}))
                .unwrap();
        assert_eq!(response.first_record_id().as_deref(), Some("abc123"));

        let numeric: WriteResponse =
            serde_json::from_value(json!({"success": true, "recordIds": [42]})).unwrap();
        assert_eq!(numeric.first_record_id().as_deref(), Some("42"));

        let empty: WriteResponse =
            serde_json::from_value(json!({"success": true, "recordIds": []})).unwrap();
        assert_eq!(empty.first_record_id(), None);

        let failed: WriteResponse =
            serde_json::from_value(json!({"success": false, "error": "dup"})).unwrap();
        assert!(!failed.success);
        assert_eq!(failed.error.as_deref(), Some("dup"));
        assert_eq!(failed.first_record_id(), None);
    }

    #[test]
    fn test_read_response_missing_data_is_empty() {
        let response: ReadResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.records().is_empty());
        assert!(!response.is_rejected());

        let null_data: ReadResponse = serde_json::from_value(json!({"data": null})).unwrap();
        assert!(null_data.records().is_empty());

        let rejected: ReadResponse =
            serde_json::from_value(json!({"success": false, "error": "bad filter"})).unwrap();
        assert!(rejected.is_rejected());
    }
}
