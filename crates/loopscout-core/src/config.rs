//! Analysis configuration.
//!
//! Loaded from a YAML (or JSON) file; every field is optional.
//!
//! ```yaml
//! selection:
//!   max_direct_branches: 1
//! library:
//!   include_defaults: true
//!   recognized: ["Vec3.*", "clamp"]
//!   recognize_local_methods: false
//! ```

use crate::errors::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub selection: SelectionConfig,
    pub library: LibraryConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectionConfig {
    /// A loop with more direct branch statements than this is rejected.
    pub max_direct_branches: usize,
    /// Log every loop verdict at debug level.
    pub trace_loops: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            max_direct_branches: 1,
            trace_loops: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LibraryConfig {
    /// Start from the built-in library model.
    pub include_defaults: bool,
    /// Extra call patterns (`Type.method`, `Type.*`, `function`).
    pub recognized: Vec<String>,
    /// Treat calls to methods of the analyzed program as recognized.
    pub recognize_local_methods: bool,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            include_defaults: true,
            recognized: Vec::new(),
            recognize_local_methods: false,
        }
    }
}

impl Config {
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(source)?)
    }

    /// Load a config file. `.json` files are read as JSON, anything else
    /// as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| AnalysisError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(serde_json::from_str(&source)?),
            _ => Self::from_yaml_str(&source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_empty_source_is_default() {
        assert_eq!(Config::from_yaml_str("").unwrap(), Config::default());
        assert_eq!(Config::default().selection.max_direct_branches, 1);
        assert!(Config::default().library.include_defaults);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml_str(indoc! {"
            library:
              recognized: [\"Vec3.*\", clamp]
        "})
        .unwrap();
        assert_eq!(config.library.recognized, vec!["Vec3.*", "clamp"]);
        assert!(config.library.include_defaults);
        assert_eq!(config.selection, SelectionConfig::default());
    }

    #[test]
    fn test_unknown_field_is_an_error() {
        let err = Config::from_yaml_str("selection:\n  max_branches: 3\n").unwrap_err();
        assert!(matches!(err, AnalysisError::Yaml(_)));
    }

    #[test]
    fn test_load_json_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loopscout.json");
        std::fs::write(&path, r#"{ "selection": { "max_direct_branches": 2 } }"#).unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.selection.max_direct_branches, 2);

        let missing = dir.path().join("missing.yaml");
        assert!(matches!(
            Config::load(&missing),
            Err(AnalysisError::Io { .. })
        ));
    }
}
