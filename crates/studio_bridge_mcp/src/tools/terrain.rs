//! Terrain volume tools.

use super::{region_props, ToolCatalog, ToolSpec};
use serde_json::json;

pub(super) fn register(catalog: &mut ToolCatalog) {
    catalog.register(ToolSpec {
        name: "roblox_terrain_fill_block",
        job_type: Some("terrain_fill_block"),
        description: "Fill a box-shaped volume with a terrain material. Undoable. \
            cframe specifies the centre (position + optional rotation). \
            size specifies the bounding box in studs. \
            Common materials: Grass, Rock, Water, Sand, Snow, Ground, Mud, Asphalt, Brick, Concrete, Ice, Salt, Sandstone, Slate, SmoothPlastic, WoodPlanks.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "cframe": {
                    "type": "object",
                    "description": "Position as {\"x\":0,\"y\":0,\"z\":0} or full 12-component CFrame {\"components\":[…]}.",
                },
                "size": { "type": "object", "description": "{\"x\":10,\"y\":5,\"z\":10} in studs." },
                "material": { "type": "string", "description": "Terrain material name." },
                "client_id": { "type": "string" },
            },
            "required": ["cframe", "size", "material"],
        }),
    });

    catalog.register(ToolSpec {
        name: "roblox_terrain_fill_ball",
        job_type: Some("terrain_fill_ball"),
        description: "Fill a sphere of terrain material at a given centre and radius. Undoable.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "center": { "type": "object", "description": "{\"x\":0,\"y\":0,\"z\":0}" },
                "radius": { "type": "number", "description": "Radius in studs." },
                "material": { "type": "string" },
                "client_id": { "type": "string" },
            },
            "required": ["center", "radius", "material"],
        }),
    });

    catalog.register(ToolSpec {
        name: "roblox_terrain_fill_cylinder",
        job_type: Some("terrain_fill_cylinder"),
        description: "Fill a cylinder of terrain material. Undoable. \
            The cylinder axis is aligned with the CFrame's Y axis.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "cframe": { "type": "object", "description": "Centre of the cylinder {\"x\":0,\"y\":0,\"z\":0}." },
                "height": { "type": "number", "description": "Height of the cylinder in studs." },
                "radius": { "type": "number", "description": "Radius of the cylinder in studs." },
                "material": { "type": "string" },
                "client_id": { "type": "string" },
            },
            "required": ["cframe", "height", "radius", "material"],
        }),
    });

    catalog.register(ToolSpec {
        name: "roblox_terrain_replace_material",
        job_type: Some("terrain_replace_material"),
        description: "Replace every voxel of one terrain material with another inside a Region3. Undoable. \
            Great for large-scale reskins, e.g. swap all Sand → Ground across a level.",
        input_schema: {
            let mut props = region_props();
            props.insert(
                "from".into(),
                json!({ "type": "string", "description": "Material to replace (e.g. Sand)." }),
            );
            props.insert(
                "to".into(),
                json!({ "type": "string", "description": "Replacement material (e.g. Ground)." }),
            );
            json!({
                "type": "object",
                "properties": props,
                "required": ["regionMin", "regionMax", "from", "to"],
            })
        },
    });

    catalog.register(ToolSpec {
        name: "roblox_terrain_read_voxels",
        job_type: Some("terrain_read_voxels"),
        description: "Read terrain voxel data (material + occupancy) from a region. \
            For regions ≤4096 voxels: returns full per-voxel list. \
            For larger regions: returns a material-frequency summary only. \
            Use a higher resolution (16 or 32) to sample large areas without hitting the limit.",
        input_schema: json!({
            "type": "object",
            "properties": region_props(),
            "required": ["regionMin", "regionMax"],
        }),
    });

    catalog.register(ToolSpec {
        name: "roblox_terrain_clear_region",
        job_type: Some("terrain_clear_region"),
        description: "Remove all terrain (fill with Air) within a Region3. Undoable.",
        input_schema: json!({
            "type": "object",
            "properties": {
                "regionMin": { "type": "object" },
                "regionMax": { "type": "object" },
                "client_id": { "type": "string" },
            },
            "required": ["regionMin", "regionMax"],
        }),
    });
}
