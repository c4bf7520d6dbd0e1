//! Defaults for configuration discovery and resolution.
//!
//! The extension list doubles as the resolution priority order: when an import
//! omits its extension, candidates are probed in exactly this order.

/// Config file names searched for when walking up from the working directory
pub const CONFIG_FILE_NAMES: &[&str] =
    &["directory_map.yml", "directory_map.yaml", "directory_map.json"];

/// Template file expected next to the config file
pub const TEMPLATE_FILE_NAME: &str = "prompt_template.md";

/// Marker inside the template where the per-file sections are spliced in
pub const FILES_PLACEHOLDER: &str = "{{files}}";

pub const DEFAULT_SOURCE_ROOT: &str = "src";
pub const DEFAULT_TEST_ROOT: &str = "test";
pub const DEFAULT_ALIAS_PREFIX: &str = "@/";

/// Extensions followed during traversal (in resolution priority order)
pub const DEFAULT_INCLUDE_EXTENSIONS: &[&str] = &[".js", ".ts", ".jsx", ".tsx"];

/// Index file stem probed when an import names a directory
pub const INDEX_STEM: &str = "index";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extensions_carry_leading_dot() {
        for ext in DEFAULT_INCLUDE_EXTENSIONS {
            assert!(ext.starts_with('.'), "'{}' should start with a dot", ext);
        }
    }

    #[test]
    fn test_default_extensions_priority_order() {
        // Plain JavaScript wins over TypeScript when both exist
        assert_eq!(DEFAULT_INCLUDE_EXTENSIONS[0], ".js");
        assert_eq!(DEFAULT_INCLUDE_EXTENSIONS[1], ".ts");
    }

    #[test]
    fn test_yaml_config_is_preferred() {
        assert_eq!(CONFIG_FILE_NAMES[0], "directory_map.yml");
    }
}
