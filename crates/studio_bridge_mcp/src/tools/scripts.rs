//! Script source tools, including the Studio script editor.

use super::{client_only_schema, ref_schema, ToolCatalog, ToolSpec};
use serde_json::json;

pub(super) fn register(catalog: &mut ToolCatalog) {
    catalog.register(ToolSpec {
        name: "roblox_read_script",
        job_type: Some("read_script"),
        description: "Read the full Source of a Script/LocalScript/ModuleScript. \
            For large scripts prefer get_script_lines to read a specific range.",
        input_schema: ref_schema(json!({}), &[]),
    });

    catalog.register(ToolSpec {
        name: "roblox_write_script",
        job_type: Some("write_script"),
        description: "Overwrite the full Source of a script. Undoable. \
            WARNING: For partial edits use patch_script instead.",
        input_schema: ref_schema(json!({ "source": { "type": "string" } }), &["source"]),
    });

    catalog.register(ToolSpec {
        name: "roblox_patch_script",
        job_type: Some("patch_script"),
        description: "Apply line-based patches to a script without rewriting the entire source. Undoable. \
            Ops: insert, replace, delete, append, prepend. \
            ALWAYS provide expectedContent for replace/delete and expectedContext for insert.",
        input_schema: ref_schema(
            json!({
                "patches": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "op": { "type": "string", "enum": ["insert", "replace", "delete", "append", "prepend"] },
                            "lineStart": { "type": "integer" },
                            "lineEnd": { "type": "integer" },
                            "content": { "type": "string" },
                            "expectedContent": { "type": "string" },
                            "expectedContext": { "type": "string" },
                        },
                        "required": ["op"],
                    },
                },
            }),
            &["patches"],
        ),
    });

    catalog.register(ToolSpec {
        name: "roblox_get_script_lines",
        job_type: Some("get_script_lines"),
        description: "Read a specific line range from a script. Omit startLine/endLine to get line count only.",
        input_schema: ref_schema(
            json!({
                "startLine": { "type": "integer" },
                "endLine": { "type": "integer" },
            }),
            &[],
        ),
    });

    catalog.register(ToolSpec {
        name: "roblox_search_script",
        job_type: Some("search_script"),
        description: "Search a script's source for a string or Lua pattern.",
        input_schema: ref_schema(
            json!({
                "query": { "type": "string" },
                "usePattern": { "type": "boolean" },
                "caseSensitive": { "type": "boolean" },
                "contextLines": { "type": "integer" },
                "maxResults": { "type": "integer" },
            }),
            &["query"],
        ),
    });

    catalog.register(ToolSpec {
        name: "roblox_get_script_functions",
        job_type: Some("get_script_functions"),
        description: "List all function definitions in a script with line numbers and types.",
        input_schema: ref_schema(json!({}), &[]),
    });

    catalog.register(ToolSpec {
        name: "roblox_search_across_scripts",
        job_type: Some("search_across_scripts"),
        description: "Search ALL scripts under an ancestor for a query string.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "query": { "type": "string" },
                "ancestorPath": { "type": "string" },
                "ancestorPathArray": { "type": "array", "items": { "type": "string" } },
                "usePattern": { "type": "boolean" },
                "caseSensitive": { "type": "boolean" },
                "maxScripts": { "type": "integer" },
                "maxMatchesPerScript": { "type": "integer" },
                "client_id": { "type": "string" },
            },
            "required": ["query"],
        }),
    });

    catalog.register(ToolSpec {
        name: "roblox_open_script",
        job_type: Some("open_script"),
        description: "Open a script in the Studio script editor tab and optionally navigate to a line.",
        input_schema: ref_schema(json!({ "line": { "type": "integer" } }), &[]),
    });

    catalog.register(ToolSpec {
        name: "roblox_get_open_scripts",
        job_type: Some("get_open_scripts"),
        description: "List all scripts currently open in the Studio script editor.",
        input_schema: client_only_schema(),
    });

    catalog.register(ToolSpec {
        name: "roblox_close_script",
        job_type: Some("close_script"),
        description: "Close a script's tab in the Studio script editor.",
        input_schema: ref_schema(json!({}), &[]),
    });
}
