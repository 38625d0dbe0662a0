//! Roadmap catalog
//!
//! The catalog is the ordered list of roadmap items a run ingests. It comes
//! either from the built-in Master Blueprint v1.2 listing or from a JSON file
//! holding an array of items. Item names are the idempotency key, so a catalog
//! with blank or repeated names is rejected before any network call.

use crate::error::{IngestError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashSet;
use std::path::Path;

/// Source identifier stamped on every built-in item
pub const BLUEPRINT_SOURCE: &str = "master-blueprint-v1.2";

/// Owner stamped on every built-in item
pub const BLUEPRINT_OWNER: &str = "Roy";

/// Phase label shown for items whose metadata carries none
pub const UNPHASED: &str = "UNPHASED";

/// Lifecycle status of a roadmap item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadmapStatus {
    Complete,
    Planned,
    InProgress,
    Blocked,
    Deprecated,
}

impl RoadmapStatus {
    /// Glyph used in previews and progress lines
    pub fn glyph(self) -> &'static str {
        match self {
            RoadmapStatus::Complete => "✅",
            RoadmapStatus::Planned
            | RoadmapStatus::InProgress
            | RoadmapStatus::Blocked
            | RoadmapStatus::Deprecated => "📋",
        }
    }
}

/// Open-ended per-item metadata
///
/// Fields vary by phase (`blockers`, `dependencies`, `pr_number`,
/// `endpoint`, ...), so values are arbitrary JSON.
pub type Metadata = Map<String, Value>;

/// One roadmap entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapItem {
    pub name: String,
    pub description: String,
    pub status: RoadmapStatus,
    #[serde(default)]
    pub metadata: Metadata,
}

impl RoadmapItem {
    /// The `phase` metadata entry, or [`UNPHASED`]
    pub fn phase(&self) -> &str {
        self.metadata
            .get("phase")
            .and_then(Value::as_str)
            .unwrap_or(UNPHASED)
    }
}

/// An ordered, name-unique list of roadmap items
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    items: Vec<RoadmapItem>,
}

impl Catalog {
    /// Validate and wrap `items`
    pub fn new(items: Vec<RoadmapItem>) -> Result<Self> {
        let mut seen = HashSet::new();
        for (index, item) in items.iter().enumerate() {
            if item.name.trim().is_empty() {
                return Err(IngestError::catalog(format!("item #{} has an empty name", index + 1)));
            }
            if !seen.insert(item.name.as_str()) {
                return Err(IngestError::catalog(format!("duplicate item name '{}'", item.name)));
            }
        }

        Ok(Self { items })
    }

    /// Load a catalog from a JSON array of items
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            IngestError::catalog(format!("cannot read '{}': {}", path.display(), e))
        })?;
        let items: Vec<RoadmapItem> = serde_json::from_str(&raw).map_err(|e| {
            IngestError::catalog(format!("cannot parse '{}': {}", path.display(), e))
        })?;

        Self::new(items)
    }

    /// The file catalog when a path is given, the built-in blueprint otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_json_file(path),
            None => Self::new(master_blueprint()),
        }
    }

    pub fn items(&self) -> &[RoadmapItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RoadmapItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a RoadmapItem;
    type IntoIter = std::slice::Iter<'a, RoadmapItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn blueprint_item(
    name: &str,
    description: &str,
    status: RoadmapStatus,
    priority: u8,
    phase: &str,
    extra: Value,
) -> RoadmapItem {
    let mut metadata = Metadata::new();
    metadata.insert("priority".to_string(), json!(priority));
    metadata.insert("owner".to_string(), json!(BLUEPRINT_OWNER));
    metadata.insert("phase".to_string(), json!(phase));
    metadata.insert("source".to_string(), json!(BLUEPRINT_SOURCE));
    if let Value::Object(extra) = extra {
        metadata.extend(extra);
    }

    RoadmapItem {
        name: name.to_string(),
        description: description.to_string(),
        status,
        metadata,
    }
}

/// The Master Blueprint v1.2 roadmap
pub fn master_blueprint() -> Vec<RoadmapItem> {
    use RoadmapStatus::{Complete, Planned};

    vec![
        // PHASE 0.5: control plane
        blueprint_item(
            "Telemetry Engine v1.0",
            "EventEmitter-based telemetry with heartbeat and failover detection",
            Complete,
            1,
            "PHASE_0.5",
            json!({"pr_number": 426, "completion_date": "2026-01-12"}),
        ),
        blueprint_item(
            "System Canon v1.0",
            "Permanent reference document defining identity, modes, and capabilities",
            Complete,
            1,
            "PHASE_0.5",
            json!({"pr_number": 417, "completion_date": "2026-01-12"}),
        ),
        blueprint_item(
            "Supabase Write Proxy",
            "Secure API route for controlled database writes (projects, milestones)",
            Complete,
            1,
            "PHASE_0.5",
            json!({"endpoint": "/api/javari/supabase/write", "completion_date": "2026-01-12"}),
        ),
        blueprint_item(
            "Supabase Read Proxy",
            "Secure API route for querying database with filters, sorting, pagination",
            Complete,
            1,
            "PHASE_0.5",
            json!({"endpoint": "/api/javari/supabase/read", "completion_date": "2026-01-12"}),
        ),
        // PHASE 1: document system
        blueprint_item(
            "Central Document Repository",
            "Unified storage for all system documentation with versioning",
            Planned,
            2,
            "PHASE_1",
            json!({"blockers": ["Define storage schema", "Choose storage backend"]}),
        ),
        blueprint_item(
            "Auto-versioning System",
            "Automatic document version tracking and history",
            Planned,
            2,
            "PHASE_1",
            json!({"dependencies": ["Central Document Repository"]}),
        ),
        blueprint_item(
            "Document Ingestion Pipeline",
            "Safe pipeline for importing external documents",
            Planned,
            2,
            "PHASE_1",
            json!({"dependencies": ["Central Document Repository"]}),
        ),
        // PHASE 2: shared services
        blueprint_item(
            "Unified RBAC System",
            "Role-based access control across all applications",
            Planned,
            3,
            "PHASE_2",
            json!({"blockers": ["Define role taxonomy", "Choose auth provider"]}),
        ),
        blueprint_item(
            "System-wide Audit Logging",
            "Centralized audit trail for all system operations",
            Planned,
            3,
            "PHASE_2",
            json!({"dependencies": ["Telemetry Engine v1.0"]}),
        ),
        blueprint_item(
            "Telemetry Dashboard",
            "Real-time monitoring and visualization of system health",
            Planned,
            3,
            "PHASE_2",
            json!({"dependencies": ["Telemetry Engine v1.0"]}),
        ),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn item(name: &str) -> RoadmapItem {
        RoadmapItem {
            name: name.to_string(),
            description: "test item".to_string(),
            status: RoadmapStatus::Planned,
            metadata: Metadata::new(),
        }
    }

    #[test]
    fn test_master_blueprint_is_valid() {
        let catalog = Catalog::load(None).unwrap();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.items()[0].name, "Telemetry Engine v1.0");
        assert_eq!(catalog.items()[0].phase(), "PHASE_0.5");
        assert_eq!(catalog.items()[0].metadata["pr_number"], json!(426));
        assert_eq!(catalog.items()[9].phase(), "PHASE_2");
        assert!(catalog
            .iter()
            .all(|i| i.metadata["source"] == json!(BLUEPRINT_SOURCE)));
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let err = Catalog::new(vec![item("A"), item("B"), item("A")]).unwrap_err();
        assert!(err.to_string().contains("duplicate item name 'A'"));
    }

    #[test]
    fn test_blank_names_are_rejected() {
        assert!(Catalog::new(vec![item("A"), item("  ")]).is_err());
    }

    #[test]
    fn test_missing_phase_reads_as_unphased() {
        assert_eq!(item("A").phase(), UNPHASED);
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_value(RoadmapStatus::InProgress).unwrap(), json!("in_progress"));
        assert_eq!(RoadmapStatus::Complete.glyph(), "✅");
        for status in [
            RoadmapStatus::Planned,
            RoadmapStatus::InProgress,
            RoadmapStatus::Blocked,
            RoadmapStatus::Deprecated,
        ] {
            assert_eq!(status.glyph(), "📋");
        }
    }

    #[test]
    fn test_item_serializes_as_store_record() {
        let value = serde_json::to_value(&master_blueprint()[4]).unwrap();
        assert_eq!(value["name"], json!("Central Document Repository"));
        assert_eq!(value["status"], json!("planned"));
        assert_eq!(
            value["metadata"]["blockers"],
            json!(["Define storage schema", "Choose storage backend"])
        );
    }

    #[test]
    fn test_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "Telemetry Engine v1.0", "description": "d", "status": "complete",
                 "metadata": {{"phase": "PHASE_0.5"}}}}]"#
        )
        .unwrap();

        let catalog = Catalog::from_json_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.items()[0].status, RoadmapStatus::Complete);
    }

    #[test]
    fn test_unreadable_file_is_catalog_error() {
        let err = Catalog::from_json_file(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, IngestError::Catalog(_)));

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        let err = Catalog::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, IngestError::Catalog(_)));
    }
}
