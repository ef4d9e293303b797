//! Trajectory execution, planning scene monitor and 3D sensor categories.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use moveit_configs_types::configs::SceneMonitorFlags;
use moveit_configs_types::error::ConfigError;
use moveit_configs_types::parameter::ParameterMap;
use regex::Regex;
use serde_yaml_ng::Value;

use super::{MoveItConfigsBuilder, mapping_to_parameters};
use crate::scan::captured_names;

static CONTROLLERS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*)_controllers\.yaml$").expect("controllers pattern is a valid regex")
});

/// Controller file stems tried, in order, when several files match.
const PREFERRED_CONTROLLER_STEMS: [&str; 2] = ["moveit", "moveit2"];

const SENSORS_FILE: &str = "sensors_3d.yaml";

impl MoveItConfigsBuilder {
    /// Load trajectory execution and controller manager parameters.
    ///
    /// Without an explicit file, `config/*_controllers.yaml` is searched. A
    /// single match is used as is. With several, `moveit`, `moveit2` and then
    /// the robot name are tried; if none is present the choice is ambiguous
    /// and [`ConfigError::AmbiguousControllers`] lists every candidate. No
    /// match at all only warns.
    pub fn resolve_trajectory_execution(
        &mut self,
        file_path: Option<&Path>,
        manage_controllers: bool,
    ) -> Result<&mut Self, ConfigError> {
        let mut execution = ParameterMap::new();
        execution.insert("moveit_manage_controllers".to_string(), manage_controllers.into());

        let controllers_file = match file_path {
            Some(file_path) => Some(self.package_path.join(file_path)),
            None => self.infer_controllers_file()?,
        };
        if let Some(path) = controllers_file {
            tracing::debug!(path = %path.display(), "loading controller parameters");
            let params = mapping_to_parameters(self.yaml.load_yaml(&path)?, &path)?;
            execution.extend(params);
        }

        self.configs.trajectory_execution = execution;
        Ok(self)
    }

    fn infer_controllers_file(&self) -> Result<Option<PathBuf>, ConfigError> {
        let config_dir = self.config_dir();
        let names = captured_names(&config_dir, &CONTROLLERS_PATTERN)?;

        let chosen = match names.as_slice() {
            [] => {
                tracing::warn!(
                    "trajectory_execution: `file_path` is undefined and no matches for {}/*_controllers.yaml",
                    config_dir.display()
                );
                return Ok(None);
            }
            [only] => only.clone(),
            _ => PREFERRED_CONTROLLER_STEMS
                .iter()
                .copied()
                .chain([self.robot_name.as_str()])
                .find(|candidate| names.iter().any(|name| name == candidate))
                .map(str::to_string)
                .ok_or_else(|| ConfigError::AmbiguousControllers {
                    candidates: names
                        .iter()
                        .map(|name| format!("{name}_controllers.yaml"))
                        .collect(),
                })?,
        };

        Ok(Some(config_dir.join(format!("{chosen}_controllers.yaml"))))
    }

    /// Set the planning scene monitor publish flags. No files are read.
    pub fn resolve_scene_monitor_flags(&mut self, flags: SceneMonitorFlags) -> &mut Self {
        self.configs.planning_scene_monitor = flags.to_parameters();
        self
    }

    /// Load `sensors_3d.yaml` if the package has one.
    ///
    /// Generated packages may ship a placeholder whose `sensors` list is
    /// empty or starts with a null entry; such files are skipped and the
    /// category is left as it was.
    pub fn resolve_sensors(&mut self, file_path: Option<&Path>) -> Result<&mut Self, ConfigError> {
        let path = self.package_file(file_path, SENSORS_FILE);
        if !path.exists() {
            return Ok(self);
        }

        let data = self.yaml.load_yaml(&path)?;
        if has_configured_sensor(&data) {
            self.configs.sensors_3d = mapping_to_parameters(data, &path)?;
        } else {
            tracing::debug!(path = %path.display(), "no sensors configured, skipping");
        }
        Ok(self)
    }
}

fn has_configured_sensor(data: &Value) -> bool {
    data.get("sensors")
        .and_then(Value::as_sequence)
        .and_then(|sensors| sensors.first())
        .is_some_and(is_truthy)
}

/// YAML truthiness: null, false, zero and empty strings, lists or mappings
/// are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}
