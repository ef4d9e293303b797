//! Single-file YAML categories: kinematics, joint limits, MoveItCpp and
//! Pilz Cartesian limits.

use std::path::Path;

use moveit_configs_types::error::ConfigError;

use super::{MoveItConfigsBuilder, mapping_to_parameters, single_entry};

const KINEMATICS_FILE: &str = "kinematics.yaml";
const JOINT_LIMITS_FILE: &str = "joint_limits.yaml";
pub const MOVEIT_CPP_FILE: &str = "moveit_cpp.yaml";
const CARTESIAN_LIMITS_FILE: &str = "pilz_cartesian_limits.yaml";
const DEPRECATED_CARTESIAN_LIMITS_FILE: &str = "cartesian_limits.yaml";

impl MoveItConfigsBuilder {
    /// Load IK solver parameters under `<name>_kinematics`.
    pub fn resolve_kinematics(&mut self, file_path: Option<&Path>) -> Result<&mut Self, ConfigError> {
        let path = self.package_file(file_path, KINEMATICS_FILE);
        let kinematics = self.yaml.load_yaml(&path)?;
        self.configs.robot_description_kinematics =
            single_entry(format!("{}_kinematics", self.description_name), kinematics);
        Ok(self)
    }

    /// Load joint limit overrides under `<name>_planning`.
    pub fn resolve_joint_limits(&mut self, file_path: Option<&Path>) -> Result<&mut Self, ConfigError> {
        let path = self.package_file(file_path, JOINT_LIMITS_FILE);
        let limits = self.yaml.load_yaml(&path)?;
        self.configs.joint_limits = single_entry(self.planning_key(), limits);
        Ok(self)
    }

    /// Load MoveItCpp parameters as top-level parameters.
    pub fn resolve_cpp_runtime_params(
        &mut self,
        file_path: Option<&Path>,
    ) -> Result<&mut Self, ConfigError> {
        let path = self.package_file(file_path, MOVEIT_CPP_FILE);
        self.configs.moveit_cpp = mapping_to_parameters(self.yaml.load_yaml(&path)?, &path)?;
        Ok(self)
    }

    /// Load Pilz Cartesian limits under `<name>_planning`.
    ///
    /// The key is shared with the joint limits; the two are deep merged when
    /// the configuration is flattened.
    pub fn resolve_pilz_cartesian_limits(
        &mut self,
        file_path: Option<&Path>,
    ) -> Result<&mut Self, ConfigError> {
        if self.config_dir().join(DEPRECATED_CARTESIAN_LIMITS_FILE).exists() {
            tracing::warn!(
                "{DEPRECATED_CARTESIAN_LIMITS_FILE} is deprecated, please rename to {CARTESIAN_LIMITS_FILE}"
            );
        }

        let path = self.package_file(file_path, CARTESIAN_LIMITS_FILE);
        let limits = self.yaml.load_yaml(&path)?;
        self.configs.pilz_cartesian_limits = single_entry(self.planning_key(), limits);
        Ok(self)
    }
}
