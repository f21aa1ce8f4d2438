//! Tool catalog: every operation the bridge can relay to the Studio plugin.
//!
//! Entries are static data, not behavior: the bridge never interprets a
//! tool's arguments beyond the `client_id` field and the `code` aliasing rule
//! in the dispatcher. Input schemas are advisory; they drive discovery via
//! `tools/list` and are not enforced on either side of the wire.
//!
//! # Categories
//!
//! - **Meta**: connection status (answered locally, never reaches the plugin)
//! - **Instance**: hierarchy reads and edits
//! - **Properties**: properties, attributes, CollectionService tags
//! - **Scripts**: read/write/patch/search plus the script editor
//! - **Studio**: selection, undo history, run modes, code execution
//! - **Terrain**: volume fills and voxel reads
//! - **Bulk**: batched mutations in a single undo waypoint
//! - **DataModel**: place, lighting, workspace, and team metadata

mod bulk;
mod catalog;
mod datamodel;
mod instance;
mod properties;
mod scripts;
mod studio;
mod terrain;

pub use catalog::ToolCatalog;

use crate::protocol::ToolDefinition;
use serde_json::{json, Map, Value};

/// The one pseudo-tool the dispatcher answers without contacting the plugin.
pub const CONNECTION_STATUS_TOOL: &str = "studio_get_connection_status";

/// One catalog entry: the public tool name, the job tag the plugin dispatches
/// on, and the advisory input schema surfaced by tools/list.
pub struct ToolSpec {
    /// Externally-visible tool name; part of the public API
    pub name: &'static str,

    /// Internal job tag; `None` for tools answered locally
    pub job_type: Option<&'static str>,

    /// Human-readable description
    pub description: &'static str,

    /// JSON-Schema-like object, descriptive only
    pub input_schema: Value,
}

impl ToolSpec {
    /// Descriptor shape for tools/list.
    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name.to_string(),
            description: self.description.to_string(),
            input_schema: self.input_schema.clone(),
        }
    }
}

/// Schema for tools that take nothing beyond an optional client id.
fn client_only_schema() -> Value {
    json!({
        "type": "object",
        "properties": { "client_id": { "type": "string" } },
    })
}

/// Properties shared by every tool addressing a single instance.
fn instance_ref_props() -> Map<String, Value> {
    let mut props = Map::new();
    props.insert(
        "path".into(),
        json!({
            "type": "string",
            "description": "Dot-separated path, e.g. 'Workspace.Baseplate'.",
        }),
    );
    props.insert(
        "pathArray".into(),
        json!({
            "type": "array",
            "items": { "type": "string" },
            "description": "Path as array of names, e.g. ['Workspace','Baseplate'].",
        }),
    );
    props.insert(
        "id".into(),
        json!({
            "type": "string",
            "description": "Debug id returned by a previous call.",
        }),
    );
    props.insert("client_id".into(), json!({ "type": "string" }));
    props
}

/// Instance-ref schema with optional extra properties and required list.
fn ref_schema(extra: Value, required: &[&str]) -> Value {
    let mut props = instance_ref_props();
    if let Value::Object(extra) = extra {
        props.extend(extra);
    }
    let mut schema = json!({ "type": "object", "properties": props });
    if !required.is_empty() {
        schema["required"] = json!(required);
    }
    schema
}

/// Properties shared by the region-based terrain tools.
fn region_props() -> Map<String, Value> {
    let mut props = Map::new();
    props.insert(
        "regionMin".into(),
        json!({ "type": "object", "description": "{\"x\":0,\"y\":0,\"z\":0} minimum corner of the region." }),
    );
    props.insert(
        "regionMax".into(),
        json!({ "type": "object", "description": "{\"x\":100,\"y\":50,\"z\":100} maximum corner." }),
    );
    props.insert(
        "resolution".into(),
        json!({ "type": "integer", "description": "Voxel resolution in studs (multiple of 4, default 4)." }),
    );
    props.insert("client_id".into(), json!({ "type": "string" }));
    props
}
