//! Property, attribute, and CollectionService tag tools.

use super::{ref_schema, ToolCatalog, ToolSpec};
use serde_json::json;

pub(super) fn register(catalog: &mut ToolCatalog) {
    catalog.register(ToolSpec {
        name: "roblox_get_properties",
        job_type: Some("get_properties"),
        description: "Read specific properties from an instance. Returns rich type objects with _type field \
            for complex types (Color3, Vector3, CFrame, UDim2, BrickColor, EnumItem, etc.).",
        input_schema: ref_schema(
            json!({
                "properties": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Property names to read.",
                },
            }),
            &["properties"],
        ),
    });

    catalog.register(ToolSpec {
        name: "roblox_set_properties",
        job_type: Some("set_properties"),
        description: "Set properties on an instance. Undoable. For complex types, use _type objects: \
            {\"_type\":\"Color3\",\"r\":255,\"g\":0,\"b\":0}, \
            {\"_type\":\"Vector3\",\"x\":1,\"y\":2,\"z\":3}, etc.",
        input_schema: ref_schema(
            json!({
                "properties": {
                    "type": "object",
                    "description": "Key/value map of properties to set. Use _type objects for rich types.",
                },
            }),
            &["properties"],
        ),
    });

    catalog.register(ToolSpec {
        name: "roblox_get_attributes",
        job_type: Some("get_attributes"),
        description: "Get all custom attributes on an instance. Returns rich type objects for complex attribute values.",
        input_schema: ref_schema(json!({}), &[]),
    });

    catalog.register(ToolSpec {
        name: "roblox_set_attributes",
        job_type: Some("set_attributes"),
        description: "Set custom attributes on an instance. Undoable. Supports rich type objects.",
        input_schema: ref_schema(json!({ "attributes": { "type": "object" } }), &["attributes"]),
    });

    catalog.register(ToolSpec {
        name: "roblox_get_all_properties",
        job_type: Some("get_all_properties"),
        description: "Read ALL properties from an instance using ReflectionService. \
            Returns every readable, non-deprecated property with its current value.",
        input_schema: ref_schema(json!({}), &[]),
    });

    catalog.register(ToolSpec {
        name: "roblox_get_tags",
        job_type: Some("get_tags"),
        description: "Get all CollectionService tags on an instance.",
        input_schema: ref_schema(json!({}), &[]),
    });

    catalog.register(ToolSpec {
        name: "roblox_add_tag",
        job_type: Some("add_tag"),
        description: "Add a CollectionService tag to an instance. Undoable.",
        input_schema: ref_schema(json!({ "tag": { "type": "string" } }), &["tag"]),
    });

    catalog.register(ToolSpec {
        name: "roblox_remove_tag",
        job_type: Some("remove_tag"),
        description: "Remove a CollectionService tag from an instance. Undoable.",
        input_schema: ref_schema(json!({ "tag": { "type": "string" } }), &["tag"]),
    });
}
