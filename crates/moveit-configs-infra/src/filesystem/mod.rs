//! Filesystem adapters for the MoveIt config builder.
//!
//! Implements the `YamlLoader` and `MacroExpander` traits from
//! `moveit-configs-core` against real files.

pub mod xacro;

use std::path::Path;

use moveit_configs_core::loader::YamlLoader;
use moveit_configs_types::error::ConfigError;
use serde_yaml_ng::Value;

/// YAML loader backed by `serde_yaml_ng`.
pub struct YamlFileLoader;

impl YamlFileLoader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for YamlFileLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl YamlLoader for YamlFileLoader {
    fn load_yaml(&self, path: &Path) -> Result<Value, ConfigError> {
        let content = read_text(path)?;
        if content.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_yaml_ng::from_str(&content).map_err(|e| ConfigError::Yaml {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Read a UTF-8 file, reporting a missing file as [`ConfigError::FileNotFound`].
fn read_text(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::FileNotFound(path.to_path_buf())
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_mapping() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("kinematics.yaml");
        std::fs::write(
            &path,
            "panda_arm:\n  kinematics_solver: kdl_kinematics_plugin/KDLKinematicsPlugin\n  kinematics_solver_timeout: 0.005\n",
        )
        .unwrap();

        let value = YamlFileLoader::new().load_yaml(&path).unwrap();
        let timeout = value
            .get("panda_arm")
            .and_then(|arm| arm.get("kinematics_solver_timeout"))
            .and_then(Value::as_f64);
        assert_eq!(timeout, Some(0.005));
    }

    #[test]
    fn empty_file_is_null() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sensors_3d.yaml");
        std::fs::write(&path, "\n# nothing configured\n").unwrap();
        let value = YamlFileLoader::new().load_yaml(&path).unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn missing_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = YamlFileLoader::new()
            .load_yaml(&tmp.path().join("absent.yaml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn malformed_yaml_names_the_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.yaml");
        std::fs::write(&path, "a: [1, 2\nb: }").unwrap();
        let err = YamlFileLoader::new().load_yaml(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
        assert!(err.to_string().contains("broken.yaml"));
    }
}
