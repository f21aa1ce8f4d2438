//! Static tool registry: discovery order and name lookup.

use super::{bulk, datamodel, instance, properties, scripts, studio, terrain, ToolSpec};
use crate::protocol::ToolDefinition;
use std::collections::HashMap;
use tracing::debug;

/// Registry of every callable tool, in stable discovery order.
pub struct ToolCatalog {
    specs: Vec<ToolSpec>,
    by_name: HashMap<&'static str, usize>,
}

impl ToolCatalog {
    /// Build the full catalog.
    pub fn new() -> Self {
        let mut catalog = Self {
            specs: Vec::new(),
            by_name: HashMap::new(),
        };

        studio::register_meta(&mut catalog);
        instance::register(&mut catalog);
        properties::register(&mut catalog);
        scripts::register(&mut catalog);
        studio::register(&mut catalog);
        terrain::register(&mut catalog);
        bulk::register(&mut catalog);
        datamodel::register(&mut catalog);

        debug!("registered {} tools", catalog.specs.len());

        catalog
    }

    pub(super) fn register(&mut self, spec: ToolSpec) {
        debug_assert!(
            !self.by_name.contains_key(spec.name),
            "duplicate tool name: {}",
            spec.name
        );
        self.by_name.insert(spec.name, self.specs.len());
        self.specs.push(spec);
    }

    /// Look up a tool by its public name.
    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.by_name.get(name).map(|&index| &self.specs[index])
    }

    /// Check if a tool exists.
    pub fn has_tool(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Descriptors for tools/list, in registration order.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.specs.iter().map(ToolSpec::definition).collect()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for ToolCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::CONNECTION_STATUS_TOOL;

    #[test]
    fn test_catalog_is_complete() {
        let catalog = ToolCatalog::new();
        // 1 local pseudo-tool + 55 job-backed tools.
        assert_eq!(catalog.len(), 56);
    }

    #[test]
    fn test_catalog_has_every_published_name() {
        let catalog = ToolCatalog::new();
        let names = [
            CONNECTION_STATUS_TOOL,
            // Instance
            "roblox_list_services",
            "roblox_get_children",
            "roblox_get_descendants",
            "roblox_get_instance",
            "roblox_find_instances",
            "roblox_get_tree",
            "roblox_create_instance",
            "roblox_delete_instance",
            "roblox_clone_instance",
            "roblox_reparent_instance",
            "roblox_set_name",
            "roblox_select_instance",
            // Properties / attributes / tags
            "roblox_get_properties",
            "roblox_set_properties",
            "roblox_get_attributes",
            "roblox_set_attributes",
            "roblox_get_all_properties",
            "roblox_get_tags",
            "roblox_add_tag",
            "roblox_remove_tag",
            // Scripts
            "roblox_read_script",
            "roblox_write_script",
            "roblox_patch_script",
            "roblox_get_script_lines",
            "roblox_search_script",
            "roblox_get_script_functions",
            "roblox_search_across_scripts",
            "roblox_open_script",
            "roblox_get_open_scripts",
            "roblox_close_script",
            // Selection / history
            "roblox_get_selection",
            "roblox_undo",
            "roblox_redo",
            "roblox_set_waypoint",
            // Studio control
            "roblox_run_code",
            "roblox_insert_model",
            "roblox_get_console_output",
            "roblox_start_stop_play",
            "roblox_run_script_in_play_mode",
            "roblox_get_studio_mode",
            // Terrain
            "roblox_terrain_fill_block",
            "roblox_terrain_fill_ball",
            "roblox_terrain_fill_cylinder",
            "roblox_terrain_replace_material",
            "roblox_terrain_read_voxels",
            "roblox_terrain_clear_region",
            // Bulk
            "roblox_bulk_create_instances",
            "roblox_bulk_set_properties",
            "roblox_bulk_delete_instances",
            "roblox_find_and_replace_in_scripts",
            // DataModel
            "roblox_get_place_info",
            "roblox_set_lighting",
            "roblox_get_workspace_info",
            "roblox_get_team_list",
            "roblox_get_lighting_effects",
        ];

        for name in names {
            assert!(catalog.has_tool(name), "missing tool: {name}");
        }
        assert_eq!(names.len(), catalog.len());
    }

    #[test]
    fn test_job_type_strips_prefix() {
        let catalog = ToolCatalog::new();
        for spec in catalog.definitions() {
            let spec = catalog.get(&spec.name).unwrap();
            if spec.name == CONNECTION_STATUS_TOOL {
                assert!(spec.job_type.is_none());
                continue;
            }
            let stripped = spec
                .name
                .strip_prefix("roblox_")
                .or_else(|| spec.name.strip_prefix("studio_"))
                .unwrap();
            assert_eq!(spec.job_type, Some(stripped), "bad job type for {}", spec.name);
        }
    }

    #[test]
    fn test_definitions_use_camel_case_schema_key() {
        let catalog = ToolCatalog::new();
        let listed = serde_json::to_value(catalog.definitions()).unwrap();
        let first = &listed[0];
        assert!(first.get("inputSchema").is_some());
        assert!(first.get("input_schema").is_none());
    }

    #[test]
    fn test_unknown_tool_lookup_fails() {
        let catalog = ToolCatalog::new();
        assert!(catalog.get("roblox_nonsense").is_none());
    }
}
