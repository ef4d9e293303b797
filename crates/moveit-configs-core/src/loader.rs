//! Collaborator traits used by the builder.
//!
//! Defined in moveit-configs-core so resolution logic can load packages
//! without depending on a specific YAML parser, xacro engine or package
//! index. The concrete adapters live in moveit-configs-infra.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use moveit_configs_types::error::ConfigError;
use serde_yaml_ng::Value;

/// Resolves a package name to its share directory.
pub trait PackageLocator: Send + Sync {
    /// Return the share directory of `package`, or
    /// [`ConfigError::PackageNotFound`].
    fn package_share_directory(&self, package: &str) -> Result<PathBuf, ConfigError>;
}

/// Parses YAML parameter files.
pub trait YamlLoader: Send + Sync {
    /// Load `path`. A missing file must be reported as
    /// [`ConfigError::FileNotFound`]; an empty file loads as `Value::Null`.
    fn load_yaml(&self, path: &Path) -> Result<Value, ConfigError>;
}

/// Expands xacro (or plain URDF/SRDF) files into a document string.
pub trait MacroExpander: Send + Sync {
    /// Expand `path` with the given `key:=value` arguments. A missing file
    /// must be reported as [`ConfigError::FileNotFound`].
    fn expand(&self, path: &Path, args: &IndexMap<String, String>) -> Result<String, ConfigError>;
}

/// Type-erased package locator for use behind a shared pointer.
pub type DynPackageLocator = Arc<dyn PackageLocator>;

/// Type-erased YAML loader for use behind a shared pointer.
pub type DynYamlLoader = Arc<dyn YamlLoader>;

/// Type-erased macro expander for use behind a shared pointer.
pub type DynMacroExpander = Arc<dyn MacroExpander>;

/// The collaborators a builder needs, bundled so they can be wired once.
#[derive(Clone)]
pub struct Collaborators {
    pub locator: DynPackageLocator,
    pub yaml: DynYamlLoader,
    pub expander: DynMacroExpander,
}

impl Collaborators {
    pub fn new(
        locator: impl PackageLocator + 'static,
        yaml: impl YamlLoader + 'static,
        expander: impl MacroExpander + 'static,
    ) -> Self {
        Self {
            locator: Arc::new(locator),
            yaml: Arc::new(yaml),
            expander: Arc::new(expander),
        }
    }
}
