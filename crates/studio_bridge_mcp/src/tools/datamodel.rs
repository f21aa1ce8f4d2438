//! Place-level DataModel tools.

use super::{client_only_schema, ToolCatalog, ToolSpec};
use serde_json::json;

pub(super) fn register(catalog: &mut ToolCatalog) {
    catalog.register(ToolSpec {
        name: "roblox_get_place_info",
        job_type: Some("get_place_info"),
        description: "Return metadata about the currently open place: PlaceId, GameId, name, \
            PlaceVersion, gravity, StreamingEnabled, all Lighting service properties, \
            and a summary of child counts for each major service.",
        input_schema: client_only_schema(),
    });

    catalog.register(ToolSpec {
        name: "roblox_set_lighting",
        job_type: Some("set_lighting"),
        description: "Set one or more Lighting service properties. Undoable. \
            Supports rich _type objects for Color3 values. \
            Useful properties: TimeOfDay ('14:00:00'), Brightness, FogEnd, FogStart, \
            FogColor, GlobalShadows, Technology (EnumItem with enumType='Technology').",
        input_schema: json!({
            "type": "object",
            "properties": {
                "properties": {
                    "type": "object",
                    "description": "Key/value map of Lighting properties to set.",
                },
                "client_id": { "type": "string" },
            },
            "required": ["properties"],
        }),
    });

    catalog.register(ToolSpec {
        name: "roblox_get_workspace_info",
        job_type: Some("get_workspace_info"),
        description: "Return key Workspace-level settings useful for level design: \
            Gravity, StreamingEnabled, streaming radii, wind settings, and the current camera CFrame.",
        input_schema: client_only_schema(),
    });

    catalog.register(ToolSpec {
        name: "roblox_get_team_list",
        job_type: Some("get_team_list"),
        description: "Return all teams in the Teams service with their BrickColor and AutoAssignable setting.",
        input_schema: client_only_schema(),
    });

    catalog.register(ToolSpec {
        name: "roblox_get_lighting_effects",
        job_type: Some("get_lighting_effects"),
        description: "Return all post-processing and lighting effects under the Lighting service \
            (Bloom, DepthOfField, ColorCorrection, SunRays, etc.) including their key property values.",
        input_schema: client_only_schema(),
    });
}
