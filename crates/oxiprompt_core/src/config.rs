use log::{debug, trace};
use path_clean::PathClean;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    constants::{
        CONFIG_FILE_NAMES, DEFAULT_ALIAS_PREFIX, DEFAULT_INCLUDE_EXTENSIONS, DEFAULT_SOURCE_ROOT,
        DEFAULT_TEST_ROOT, TEMPLATE_FILE_NAME,
    },
    error::BundleError,
};

/// On-disk shape of `directory_map.yml`. Every key is optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawConfig {
    source_root: String,
    test_root: String,
    include_extensions: Vec<String>,
    alias_prefix: String,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            source_root: DEFAULT_SOURCE_ROOT.to_string(),
            test_root: DEFAULT_TEST_ROOT.to_string(),
            include_extensions: DEFAULT_INCLUDE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            alias_prefix: DEFAULT_ALIAS_PREFIX.to_string(),
        }
    }
}

/// Resolved configuration shared by resolution, traversal and rendering.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the config file; headings are rendered relative to it
    pub project_root: PathBuf,
    /// Target of the alias prefix
    pub source_root: PathBuf,
    /// Not used by traversal
    pub test_root: PathBuf,
    /// Followed extensions, each with a leading dot, in resolution priority order
    pub include_extensions: Vec<String>,
    pub alias_prefix: String,
}

impl Config {
    /// Default configuration rooted at `project_root`.
    pub fn for_project(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        Self::from_raw(project_root, RawConfig::default())
    }

    fn from_raw(project_root: PathBuf, raw: RawConfig) -> Self {
        let source_root = project_root.join(&raw.source_root).clean();
        let test_root = project_root.join(&raw.test_root).clean();
        let include_extensions =
            raw.include_extensions.iter().map(|e| normalize_extension(e.trim())).collect();

        Self {
            source_root: source_root.canonicalize().unwrap_or(source_root),
            test_root,
            include_extensions,
            alias_prefix: raw.alias_prefix,
            project_root,
        }
    }

    /// Rejects configurations the resolver cannot work with.
    pub fn validate(&self, origin: &Path) -> Result<(), BundleError> {
        let invalid = |reason: &str| BundleError::ConfigurationInvalid {
            path: origin.to_path_buf(),
            reason: reason.to_string(),
        };

        if self.include_extensions.is_empty() {
            return Err(invalid("includeExtensions must list at least one extension"));
        }
        if self.include_extensions.iter().any(|e| e.is_empty() || e == ".") {
            return Err(invalid("includeExtensions contains an empty extension"));
        }
        if self.alias_prefix.is_empty() {
            return Err(invalid("aliasPrefix must not be empty"));
        }
        Ok(())
    }

    /// Whether the file name of `path` ends with one of the included extensions.
    pub fn includes(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        self.include_extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }
}

fn normalize_extension(ext: &str) -> String {
    if ext.is_empty() || ext.starts_with('.') { ext.to_string() } else { format!(".{}", ext) }
}

/// Walks up from `start` looking for one of [`CONFIG_FILE_NAMES`].
pub fn find_config(start: &Path) -> Result<PathBuf, BundleError> {
    debug!("Searching for config file from {}", start.display());
    let mut current_dir = Some(start);

    while let Some(dir) = current_dir {
        for name in CONFIG_FILE_NAMES {
            let candidate = dir.join(name);
            trace!("Checking for config at: {:?}", candidate);
            if candidate.is_file() {
                debug!("Found config at: {:?}", candidate);
                return Ok(candidate);
            }
        }
        current_dir = dir.parent();
    }

    debug!("No config file in {} or any parent folder", start.display());
    Err(BundleError::ConfigurationMissing(format!(
        "no {} in {} or any parent folder",
        CONFIG_FILE_NAMES.join(" / "),
        start.display()
    )))
}

/// Loads, normalises and validates the config at `path`.
///
/// YAML (`.yml`, `.yaml`) and JSON (`.json`) are accepted. Relative roots are
/// anchored at the config file's directory.
pub fn load_config(path: &Path) -> Result<Config, BundleError> {
    debug!("Loading config from {}", path.display());
    if !path.is_file() {
        return Err(BundleError::ConfigurationMissing(path.display().to_string()));
    }
    let path = path.canonicalize()?;
    let content = fs::read_to_string(&path)?;

    let invalid =
        |reason: String| BundleError::ConfigurationInvalid { path: path.clone(), reason };

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
    let raw: RawConfig = match ext.as_str() {
        "yml" | "yaml" => serde_yaml::from_str(&content).map_err(|e| invalid(e.to_string()))?,
        "json" => serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?,
        other => return Err(invalid(format!("unsupported config extension '.{}'", other))),
    };

    let project_root = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let cfg = Config::from_raw(project_root, raw);
    cfg.validate(&path)?;

    debug!(
        "Config: source_root={}, extensions={:?}, alias='{}'",
        cfg.source_root.display(),
        cfg.include_extensions,
        cfg.alias_prefix
    );
    Ok(cfg)
}

/// Where the template lives when none is given explicitly.
pub fn default_template_path(cfg: &Config) -> PathBuf {
    cfg.project_root.join(TEMPLATE_FILE_NAME)
}

/// Reads the template text. Its structure is not inspected.
pub fn load_template(path: &Path) -> Result<String, BundleError> {
    debug!("Loading template from {}", path.display());
    if !path.is_file() {
        return Err(BundleError::TemplateMissing(path.to_path_buf()));
    }
    Ok(fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    #[test]
    fn test_find_config_in_parent() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let config = create_test_file(root, "directory_map.yml", "sourceRoot: src\n");
        let subdir = root.join("src").join("components");
        fs::create_dir_all(&subdir).unwrap();

        let found = find_config(&subdir).unwrap();
        assert_eq!(found, config);
    }

    #[test]
    fn test_find_config_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let subdir = temp_dir.path().join("nested").join("deep");
        fs::create_dir_all(&subdir).unwrap();

        // A stray directory_map.yml higher up the real filesystem would make this flaky,
        // so only assert on the error kind when nothing is found.
        if let Err(e) = find_config(&subdir) {
            assert!(matches!(e, BundleError::ConfigurationMissing(_)));
        }
    }

    #[test]
    fn test_load_yaml_config() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let path = create_test_file(
            root,
            "directory_map.yml",
            "sourceRoot: app\ntestRoot: e2e\nincludeExtensions:\n  - .ts\n  - .tsx\n",
        );

        let cfg = load_config(&path).unwrap();
        let root = root.canonicalize().unwrap();
        assert_eq!(cfg.project_root, root);
        assert_eq!(cfg.source_root, root.join("app"));
        assert_eq!(cfg.test_root, root.join("e2e"));
        assert_eq!(cfg.include_extensions, vec![".ts", ".tsx"]);
        assert_eq!(cfg.alias_prefix, "@/");
    }

    #[test]
    fn test_load_json_config() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let path = create_test_file(
            root,
            "directory_map.json",
            r#"{ "sourceRoot": "lib", "includeExtensions": [".js"], "aliasPrefix": "~/" }"#,
        );

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.source_root, root.canonicalize().unwrap().join("lib"));
        assert_eq!(cfg.include_extensions, vec![".js"]);
        assert_eq!(cfg.alias_prefix, "~/");
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_test_file(temp_dir.path(), "directory_map.yml", "testRoot: test\n");

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.include_extensions, vec![".js", ".ts", ".jsx", ".tsx"]);
        assert!(cfg.source_root.ends_with("src"));
    }

    #[test]
    fn test_extensions_without_dot_are_normalised() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_test_file(
            temp_dir.path(),
            "directory_map.yml",
            "includeExtensions: [ts, .tsx]\n",
        );

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.include_extensions, vec![".ts", ".tsx"]);
    }

    #[test]
    fn test_empty_extensions_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path =
            create_test_file(temp_dir.path(), "directory_map.yml", "includeExtensions: []\n");

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, BundleError::ConfigurationInvalid { .. }));
    }

    #[test]
    fn test_malformed_yaml_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_test_file(
            temp_dir.path(),
            "directory_map.yml",
            "includeExtensions: \"not a list\"\n",
        );

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, BundleError::ConfigurationInvalid { .. }));
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_test_file(temp_dir.path(), "directory_map.toml", "sourceRoot = 'src'");

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, BundleError::ConfigurationInvalid { .. }));
    }

    #[test]
    fn test_missing_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_config(&temp_dir.path().join("directory_map.yml")).unwrap_err();
        assert!(matches!(err, BundleError::ConfigurationMissing(_)));
    }

    #[test]
    fn test_includes_matches_suffix() {
        let mut cfg = Config::for_project("/project");
        cfg.include_extensions = vec![".ts".to_string(), ".d.ts".to_string()];
        assert!(cfg.includes(Path::new("/project/src/a.ts")));
        assert!(cfg.includes(Path::new("/project/src/types.d.ts")));
        assert!(!cfg.includes(Path::new("/project/src/a.tsx")));
        assert!(!cfg.includes(Path::new("/project/src/utils")));
    }

    #[test]
    fn test_load_template() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_test_file(temp_dir.path(), "prompt_template.md", "# Context\n");
        assert_eq!(load_template(&path).unwrap(), "# Context\n");
    }

    #[test]
    fn test_missing_template() {
        let temp_dir = TempDir::new().unwrap();
        let cfg = Config::for_project(temp_dir.path());
        let err = load_template(&default_template_path(&cfg)).unwrap_err();
        assert!(matches!(err, BundleError::TemplateMissing(_)));
    }
}
