//! Batched mutation tools. Each runs in a single undo waypoint on the
//! plugin side.

use super::{ToolCatalog, ToolSpec};
use serde_json::json;

pub(super) fn register(catalog: &mut ToolCatalog) {
    catalog.register(ToolSpec {
        name: "roblox_bulk_create_instances",
        job_type: Some("bulk_create_instances"),
        description: "Create up to 200 instances in a single round-trip, all in one undo waypoint. \
            Each entry needs className; optionally parentPath/parentPathArray and a properties dict \
            that supports _type rich-type objects. \
            Much faster than calling create_instance N times for large batch work.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "instances": {
                    "type": "array",
                    "maxItems": 200,
                    "description": "Array of instance specs to create.",
                    "items": {
                        "type": "object",
                        "properties": {
                            "className": { "type": "string" },
                            "parentPath": { "type": "string" },
                            "parentPathArray": { "type": "array", "items": { "type": "string" } },
                            "properties": { "type": "object" },
                        },
                        "required": ["className"],
                    },
                },
                "client_id": { "type": "string" },
            },
            "required": ["instances"],
        }),
    });

    catalog.register(ToolSpec {
        name: "roblox_bulk_set_properties",
        job_type: Some("bulk_set_properties"),
        description: "Set properties on up to 200 instances in one round-trip, wrapped in one undo waypoint. \
            Each operation is an instance ref (path/pathArray/id) plus a properties dict. \
            Supports rich _type objects. Much faster than N individual set_properties calls.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "operations": {
                    "type": "array",
                    "maxItems": 200,
                    "items": {
                        "type": "object",
                        "properties": {
                            "path": { "type": "string" },
                            "pathArray": { "type": "array", "items": { "type": "string" } },
                            "id": { "type": "string" },
                            "properties": { "type": "object" },
                        },
                        "required": ["properties"],
                    },
                },
                "client_id": { "type": "string" },
            },
            "required": ["operations"],
        }),
    });

    catalog.register(ToolSpec {
        name: "roblox_bulk_delete_instances",
        job_type: Some("bulk_delete_instances"),
        description: "Delete multiple instances in one round-trip, wrapped in one undo waypoint. \
            All descendants are destroyed. Provide an array of instance refs.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "instances": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "path": { "type": "string" },
                            "pathArray": { "type": "array", "items": { "type": "string" } },
                            "id": { "type": "string" },
                        },
                    },
                },
                "client_id": { "type": "string" },
            },
            "required": ["instances"],
        }),
    });

    catalog.register(ToolSpec {
        name: "roblox_find_and_replace_in_scripts",
        job_type: Some("find_and_replace_in_scripts"),
        description: "Find a plain string in all scripts under an ancestor and replace it everywhere. \
            All changes wrapped in one undo waypoint. \
            Set dryRun=true to preview matches without modifying. \
            caseSensitive defaults to true. maxScripts caps modifications (default 50, max 200). \
            Great for renaming a variable, function, or module require path across a codebase.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "find": { "type": "string", "description": "Plain string to find." },
                "replace": { "type": "string", "description": "Replacement string." },
                "ancestorPath": { "type": "string" },
                "ancestorPathArray": { "type": "array", "items": { "type": "string" } },
                "caseSensitive": { "type": "boolean" },
                "maxScripts": { "type": "integer", "description": "Max scripts to modify (default 50)." },
                "dryRun": { "type": "boolean", "description": "Preview without modifying if true." },
                "client_id": { "type": "string" },
            },
            "required": ["find", "replace"],
        }),
    });
}
