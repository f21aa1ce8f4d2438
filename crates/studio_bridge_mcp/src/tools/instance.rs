//! Instance hierarchy tools.

use super::{client_only_schema, ref_schema, ToolCatalog, ToolSpec};
use serde_json::json;

pub(super) fn register(catalog: &mut ToolCatalog) {
    catalog.register(ToolSpec {
        name: "roblox_list_services",
        job_type: Some("list_services"),
        description: "List top-level services in the current place.",
        input_schema: client_only_schema(),
    });

    catalog.register(ToolSpec {
        name: "roblox_get_children",
        job_type: Some("get_children"),
        description: "Get the direct children of an instance.",
        input_schema: ref_schema(json!({}), &[]),
    });

    catalog.register(ToolSpec {
        name: "roblox_get_descendants",
        job_type: Some("get_descendants"),
        description: "Get all descendants of an instance. Can be large - prefer get_tree for an overview.",
        input_schema: ref_schema(json!({}), &[]),
    });

    catalog.register(ToolSpec {
        name: "roblox_get_instance",
        job_type: Some("get_instance"),
        description: "Get info (name, className, fullName) for a single instance.",
        input_schema: ref_schema(json!({}), &[]),
    });

    catalog.register(ToolSpec {
        name: "roblox_find_instances",
        job_type: Some("find_instances"),
        description: "Find instances matching name, className, and/or tag under an ancestor.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "name": { "type": "string", "description": "Exact Name match." },
                "className": { "type": "string", "description": "Exact ClassName match." },
                "tag": { "type": "string", "description": "Must have this CollectionService tag." },
                "ancestorPath": { "type": "string" },
                "ancestorPathArray": { "type": "array", "items": { "type": "string" } },
                "client_id": { "type": "string" },
            },
        }),
    });

    catalog.register(ToolSpec {
        name: "roblox_get_tree",
        job_type: Some("get_tree"),
        description: "Get a compact recursive tree of an instance hierarchy. \
            Returns name, className, and for scripts the line count. \
            Use maxDepth to limit depth (default 5) and maxChildren to cap children per node (default 50).",
        input_schema: ref_schema(
            json!({
                "maxDepth": { "type": "integer", "description": "Max tree depth (default 5)." },
                "maxChildren": { "type": "integer", "description": "Max children per node (default 50)." },
            }),
            &[],
        ),
    });

    catalog.register(ToolSpec {
        name: "roblox_create_instance",
        job_type: Some("create_instance"),
        description: "Create a new instance. Set properties (including Name, Source for scripts) \
            via the properties dict. Supports rich types via _type objects.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "className": { "type": "string" },
                "parentPath": { "type": "string" },
                "parentPathArray": { "type": "array", "items": { "type": "string" } },
                "properties": {
                    "type": "object",
                    "description": "Key/value map of properties to set. Use _type objects for rich types.",
                },
                "client_id": { "type": "string" },
            },
            "required": ["className"],
        }),
    });

    catalog.register(ToolSpec {
        name: "roblox_delete_instance",
        job_type: Some("delete_instance"),
        description: "Destroy an instance and all its descendants. Undoable via Ctrl+Z.",
        input_schema: ref_schema(json!({}), &[]),
    });

    catalog.register(ToolSpec {
        name: "roblox_clone_instance",
        job_type: Some("clone_instance"),
        description: "Clone an instance (and its descendants). Optionally place under a new parent and rename. Undoable.",
        input_schema: ref_schema(
            json!({
                "newParentPath": { "type": "string" },
                "newParentPathArray": { "type": "array", "items": { "type": "string" } },
                "newName": { "type": "string", "description": "Rename the clone." },
            }),
            &[],
        ),
    });

    catalog.register(ToolSpec {
        name: "roblox_reparent_instance",
        job_type: Some("reparent_instance"),
        description: "Move an instance to a new parent. Undoable.",
        input_schema: ref_schema(
            json!({
                "newParentPath": { "type": "string" },
                "newParentPathArray": { "type": "array", "items": { "type": "string" } },
            }),
            &["newParentPath"],
        ),
    });

    catalog.register(ToolSpec {
        name: "roblox_set_name",
        job_type: Some("set_name"),
        description: "Rename an instance. Undoable.",
        input_schema: ref_schema(json!({ "name": { "type": "string" } }), &["name"]),
    });

    catalog.register(ToolSpec {
        name: "roblox_select_instance",
        job_type: Some("select_instance"),
        description: "Select an instance in the Studio Explorer (for visibility).",
        input_schema: ref_schema(json!({}), &[]),
    });
}
