//! Builder that resolves a `<robot>_moveit_config` package.
//!
//! By default it expects the layout produced by the MoveIt setup assistant:
//!
//! ```text
//! <robot>_moveit_config/
//!     .setup_assistant             -- which URDF/SRDF the package was generated from
//!     config/
//!         kinematics.yaml          -- IK solver parameters
//!         joint_limits.yaml        -- position/velocity/acceleration overrides
//!         moveit_cpp.yaml          -- MoveItCpp parameters
//!         *_planning.yaml          -- planning pipeline parameters
//!         pilz_cartesian_limits.yaml
//!         *_controllers.yaml       -- trajectory execution manager parameters
//!         sensors_3d.yaml
//! ```
//!
//! Each `resolve_*` method accepts an optional file path, relative to the
//! package root or absolute, that overrides the conventional location.
//! Methods return `&mut Self` so calls can be chained; [`MoveItConfigsBuilder::build_all`]
//! fills in every category that was not configured explicitly.

mod description;
mod execution;
mod limits;
mod pipelines;

pub use description::MacroArgs;
pub use execution::is_truthy;

use std::path::{Path, PathBuf};

use moveit_configs_types::config::DEFAULT_ROBOT_DESCRIPTION;
use moveit_configs_types::configs::{self, ConfigurationSet};
use moveit_configs_types::error::ConfigError;
use moveit_configs_types::merge::merge_parameter;
use moveit_configs_types::parameter::{ParameterMap, ParameterValue};
use serde_yaml_ng::Value;

use crate::loader::{Collaborators, DynMacroExpander, DynPackageLocator, DynYamlLoader};
use crate::setup_assistant::{SETUP_ASSISTANT_FILE, SetupAssistantInfo};

/// Directory, relative to the package root, holding the conventional files.
pub const CONFIG_DIR: &str = "config";

/// Package shipping the bundled pipeline defaults.
pub const DEFAULTS_PACKAGE: &str = "moveit_configs_utils";

/// Subdirectory of [`DEFAULTS_PACKAGE`] with the bundled defaults.
pub const DEFAULTS_SUBDIR: &str = "default_configs";

/// Pipeline whose presence triggers loading Cartesian limits in `build_all`.
pub const PILZ_PIPELINE: &str = "pilz_industrial_motion_planner";

/// Construction options beyond the robot name.
#[derive(Debug, Clone)]
pub struct BuilderOptions {
    /// Config package name; defaults to `<robot>_moveit_config`.
    pub package_name: Option<String>,
    /// Parameter name of the URDF and prefix of the derived keys.
    pub robot_description: String,
    /// Bundled defaults directory; defaults to
    /// `<share of moveit_configs_utils>/default_configs`.
    pub defaults_dir: Option<PathBuf>,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            package_name: None,
            robot_description: DEFAULT_ROBOT_DESCRIPTION.to_string(),
            defaults_dir: None,
        }
    }
}

/// Resolves and loads the files of one MoveIt config package.
pub struct MoveItConfigsBuilder {
    robot_name: String,
    /// Parameter name of the URDF; `_semantic`, `_kinematics` and `_planning`
    /// keys derive from it.
    description_name: String,
    package_path: PathBuf,
    urdf_package: PathBuf,
    /// Relative to `urdf_package`.
    urdf_file_path: PathBuf,
    urdf_xacro_args: Option<indexmap::IndexMap<String, String>>,
    /// Relative to `package_path`.
    srdf_file_path: PathBuf,
    defaults_dir: Option<PathBuf>,
    locator: DynPackageLocator,
    yaml: DynYamlLoader,
    expander: DynMacroExpander,
    configs: ConfigurationSet,
    base_parameters: ParameterMap,
}

impl MoveItConfigsBuilder {
    /// Locate the config package and infer the URDF/SRDF sources.
    ///
    /// Precedence for the URDF: `config/<robot>.urdf.xacro` in the package,
    /// then the `.setup_assistant` entry, then `config/<robot>.urdf`. The
    /// SRDF comes from `.setup_assistant`, else `config/<robot>.srdf`. Falling
    /// back to a conventional path only warns: the URDF may be published at
    /// runtime instead.
    pub fn new(
        robot_name: &str,
        collaborators: Collaborators,
        options: BuilderOptions,
    ) -> Result<Self, ConfigError> {
        let Collaborators {
            locator,
            yaml,
            expander,
        } = collaborators;

        let package_name = options
            .package_name
            .unwrap_or_else(|| format!("{robot_name}_moveit_config"));
        let package_path = locator.package_share_directory(&package_name)?;
        let config_dir = Path::new(CONFIG_DIR);

        let mut urdf_package = None;
        let mut urdf_file_path = None;
        let mut urdf_xacro_args = None;
        let mut srdf_file_path = None;

        let modified_urdf_path = config_dir.join(format!("{robot_name}.urdf.xacro"));
        if package_path.join(&modified_urdf_path).exists() {
            urdf_package = Some(package_path.clone());
            urdf_file_path = Some(modified_urdf_path);
        }

        let setup_assistant_file = package_path.join(SETUP_ASSISTANT_FILE);
        if setup_assistant_file.exists() {
            let info = SetupAssistantInfo::from_yaml(&yaml.load_yaml(&setup_assistant_file)?)?;
            if let Some(urdf) = info.urdf {
                if urdf_package.is_none() {
                    if let Some(package) = &urdf.package {
                        urdf_package = Some(locator.package_share_directory(package)?);
                    }
                    urdf_file_path = urdf.relative_path;
                }
                urdf_xacro_args = urdf.xacro_args;
            }
            srdf_file_path = info.srdf_relative_path;
        }

        let (urdf_package, urdf_file_path) = match (urdf_package, urdf_file_path) {
            (Some(package), Some(file)) => (package, file),
            _ => {
                tracing::warn!(
                    "Cannot infer URDF from `{}`. -- using config/{robot_name}.urdf",
                    package_path.display()
                );
                (
                    package_path.clone(),
                    config_dir.join(format!("{robot_name}.urdf")),
                )
            }
        };

        let srdf_file_path = srdf_file_path.unwrap_or_else(|| {
            tracing::warn!(
                "Cannot infer SRDF from `{}`. -- using config/{robot_name}.srdf",
                package_path.display()
            );
            config_dir.join(format!("{robot_name}.srdf"))
        });

        tracing::debug!(
            package = %package_path.display(),
            urdf = %urdf_package.join(&urdf_file_path).display(),
            srdf = %srdf_file_path.display(),
            "resolved MoveIt config package"
        );

        Ok(Self {
            robot_name: robot_name.to_string(),
            description_name: options.robot_description,
            configs: ConfigurationSet::new(package_path.clone()),
            package_path,
            urdf_package,
            urdf_file_path,
            urdf_xacro_args,
            srdf_file_path,
            defaults_dir: options.defaults_dir,
            locator,
            yaml,
            expander,
            base_parameters: ParameterMap::new(),
        })
    }

    pub fn robot_name(&self) -> &str {
        &self.robot_name
    }

    pub fn package_path(&self) -> &Path {
        &self.package_path
    }

    /// Path of the URDF that `resolve_robot_model(None, ..)` would load.
    pub fn urdf_path(&self) -> PathBuf {
        self.urdf_package.join(&self.urdf_file_path)
    }

    /// Path of the SRDF that `resolve_semantic_model(None, ..)` would load.
    pub fn srdf_path(&self) -> PathBuf {
        self.package_path.join(&self.srdf_file_path)
    }

    /// The categories resolved so far.
    pub fn configs(&self) -> &ConfigurationSet {
        &self.configs
    }

    pub fn into_configs(self) -> ConfigurationSet {
        self.configs
    }

    pub fn base_parameters(&self) -> &ParameterMap {
        &self.base_parameters
    }

    /// Set one base parameter, outside any MoveIt category.
    pub fn parameter(&mut self, name: &str, value: impl Into<ParameterValue>) -> &mut Self {
        self.base_parameters.insert(name.to_string(), value.into());
        self
    }

    /// Set the move_group capabilities to load and to disable, each a space
    /// separated list of plugin names.
    pub fn move_group_capabilities(
        &mut self,
        capabilities: &str,
        disable_capabilities: &str,
    ) -> &mut Self {
        self.configs.move_group_capabilities =
            configs::move_group_capabilities(capabilities, disable_capabilities);
        self
    }

    /// Load a YAML mapping into the base parameters.
    ///
    /// Without a namespace the file's top-level keys become parameters. With
    /// one, the file is deep merged into that parameter.
    pub fn parameters_yaml(
        &mut self,
        file_path: &Path,
        namespace: Option<&str>,
    ) -> Result<&mut Self, ConfigError> {
        let path = self.package_path.join(file_path);
        let value = self.yaml.load_yaml(&path)?;
        match namespace {
            Some(namespace) => match self.base_parameters.get_mut(namespace) {
                Some(existing) => merge_parameter(existing, value.into()),
                None => {
                    self.base_parameters
                        .insert(namespace.to_string(), value.into());
                }
            },
            None => {
                let params = mapping_to_parameters(value, &path)?;
                self.base_parameters.extend(params);
            }
        }
        Ok(self)
    }

    /// Resolve every category that is still empty, with default arguments.
    ///
    /// `moveit_cpp.yaml` is only picked up when the package ships one, and
    /// Cartesian limits only when the Pilz pipeline is loaded. An empty
    /// category counts as unresolved, so categories that legitimately came
    /// out empty (no sensors, a missing URDF) are retried on every call.
    pub fn build_all(&mut self) -> Result<&ConfigurationSet, ConfigError> {
        if self.configs.robot_description.is_empty() {
            self.resolve_robot_model(None, None)?;
        }
        if self.configs.robot_description_semantic.is_empty() {
            self.resolve_semantic_model(None, None)?;
        }
        if self.configs.robot_description_kinematics.is_empty() {
            self.resolve_kinematics(None)?;
        }
        if self.configs.planning_pipelines.is_empty() {
            self.resolve_planning_pipelines(None, None, true)?;
        }
        if self.configs.trajectory_execution.is_empty() {
            self.resolve_trajectory_execution(None, true)?;
        }
        if self.configs.planning_scene_monitor.is_empty() {
            self.resolve_scene_monitor_flags(Default::default());
        }
        if self.configs.sensors_3d.is_empty() {
            self.resolve_sensors(None)?;
        }
        if self.configs.joint_limits.is_empty() {
            self.resolve_joint_limits(None)?;
        }
        if self.configs.moveit_cpp.is_empty()
            && self.package_file(None, limits::MOVEIT_CPP_FILE).is_file()
        {
            self.resolve_cpp_runtime_params(None)?;
        }
        let has_pilz = self
            .configs
            .pipeline_names()
            .iter()
            .any(|p| p == PILZ_PIPELINE);
        if has_pilz && self.configs.pilz_cartesian_limits.is_empty() {
            self.resolve_pilz_cartesian_limits(None)?;
        }
        Ok(&self.configs)
    }

    /// Build everything and flatten it into one parameter namespace.
    ///
    /// With `include_base_params`, parameters set through
    /// [`parameter`](Self::parameter) or [`parameters_yaml`](Self::parameters_yaml)
    /// come first and MoveIt parameters are overlaid on top.
    pub fn flatten(&mut self, include_base_params: bool) -> Result<ParameterMap, ConfigError> {
        let moveit = self.build_all()?.to_parameters();
        let mut parameters = if include_base_params {
            self.base_parameters.clone()
        } else {
            ParameterMap::new()
        };
        parameters.extend(moveit);
        Ok(parameters)
    }

    fn config_dir(&self) -> PathBuf {
        self.package_path.join(CONFIG_DIR)
    }

    /// The override joined to the package root, else `config/<default_name>`.
    fn package_file(&self, file_path: Option<&Path>, default_name: &str) -> PathBuf {
        match file_path {
            Some(file_path) => self.package_path.join(file_path),
            None => self.config_dir().join(default_name),
        }
    }

    fn defaults_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.defaults_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(self
                .locator
                .package_share_directory(DEFAULTS_PACKAGE)?
                .join(DEFAULTS_SUBDIR)),
        }
    }

    fn planning_key(&self) -> String {
        format!("{}_planning", self.description_name)
    }
}

/// Convert a loaded YAML document into top-level parameters.
///
/// An empty document yields no parameters; anything other than a mapping
/// with string keys is rejected.
pub(crate) fn mapping_to_parameters(value: Value, path: &Path) -> Result<ParameterMap, ConfigError> {
    let mapping = match value {
        Value::Null => return Ok(ParameterMap::new()),
        Value::Mapping(mapping) => mapping,
        _ => {
            return Err(ConfigError::InvalidShape {
                path: path.to_path_buf(),
                expected: "a mapping of parameters",
            });
        }
    };
    mapping
        .into_iter()
        .map(|(key, value)| match key {
            Value::String(key) => Ok((key, ParameterValue::Value(value))),
            _ => Err(ConfigError::InvalidShape {
                path: path.to_path_buf(),
                expected: "string parameter names",
            }),
        })
        .collect()
}

/// A category holding exactly one entry.
pub(crate) fn single_entry(key: String, value: impl Into<ParameterValue>) -> ParameterMap {
    let mut map = ParameterMap::new();
    map.insert(key, value.into());
    map
}
