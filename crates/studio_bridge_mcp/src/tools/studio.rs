//! Selection, undo history, and Studio control tools, plus the local
//! connection-status pseudo-tool.

use super::{client_only_schema, ToolCatalog, ToolSpec, CONNECTION_STATUS_TOOL};
use serde_json::json;

/// The connection-status pseudo-tool is registered first so it heads the
/// discovery list; the dispatcher answers it without minting a job.
pub(super) fn register_meta(catalog: &mut ToolCatalog) {
    catalog.register(ToolSpec {
        name: CONNECTION_STATUS_TOOL,
        job_type: None,
        description: "Check if the Roblox Studio plugin is connected to the bridge.",
        input_schema: client_only_schema(),
    });
}

pub(super) fn register(catalog: &mut ToolCatalog) {
    catalog.register(ToolSpec {
        name: "roblox_get_selection",
        job_type: Some("get_selection"),
        description: "Get the instances currently selected in the Studio Explorer.",
        input_schema: client_only_schema(),
    });

    catalog.register(ToolSpec {
        name: "roblox_undo",
        job_type: Some("undo"),
        description: "Undo the last action in Studio. Equivalent to Ctrl+Z.",
        input_schema: client_only_schema(),
    });

    catalog.register(ToolSpec {
        name: "roblox_redo",
        job_type: Some("redo"),
        description: "Redo the last undone action in Studio. Equivalent to Ctrl+Y.",
        input_schema: client_only_schema(),
    });

    catalog.register(ToolSpec {
        name: "roblox_set_waypoint",
        job_type: Some("set_waypoint"),
        description: "Set a named undo/redo waypoint.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "client_id": { "type": "string" },
            },
        }),
    });

    catalog.register(ToolSpec {
        name: "roblox_run_code",
        job_type: Some("run_code"),
        description: "Execute arbitrary Lua code within Studio and return a serialized result.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "code": { "type": "string" },
                "client_id": { "type": "string" },
            },
            "required": ["code"],
        }),
    });

    catalog.register(ToolSpec {
        name: "roblox_insert_model",
        job_type: Some("insert_model"),
        description: "Insert a Marketplace asset into Workspace using InsertService.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "assetId": { "type": "string" },
                "client_id": { "type": "string" },
            },
            "required": ["assetId"],
        }),
    });

    catalog.register(ToolSpec {
        name: "roblox_get_console_output",
        job_type: Some("get_console_output"),
        description: "Read the buffered Studio Output log captured by the plugin.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "since": { "type": "number" },
                "maxEntries": { "type": "integer" },
                "client_id": { "type": "string" },
            },
        }),
    });

    catalog.register(ToolSpec {
        name: "roblox_start_stop_play",
        job_type: Some("start_stop_play"),
        description: "Switch Studio between Edit, Play, Run, or Test modes.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "mode": { "type": "string" },
                "action": { "type": "string" },
                "client_id": { "type": "string" },
            },
            "required": ["mode"],
        }),
    });

    catalog.register(ToolSpec {
        name: "roblox_run_script_in_play_mode",
        job_type: Some("run_script_in_play_mode"),
        description: "Run a Lua snippet while Studio is in Play or Run mode.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "code": { "type": "string" },
                "client_id": { "type": "string" },
            },
            "required": ["code"],
        }),
    });

    catalog.register(ToolSpec {
        name: "roblox_get_studio_mode",
        job_type: Some("get_studio_mode"),
        description: "Query the current Studio run mode and whether play mode is active.",
        input_schema: client_only_schema(),
    });
}
