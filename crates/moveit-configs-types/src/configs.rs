//! The aggregate result of resolving a MoveIt configuration package.
//!
//! Each category is an independent [`ParameterMap`] that defaults to empty.
//! Re-resolving a category replaces its map; categories are only combined by
//! [`ConfigurationSet::to_parameters`].

use std::path::PathBuf;

use serde_yaml_ng::Value;

use crate::merge::merge_parameter_maps;
use crate::parameter::ParameterMap;

/// Parameters loaded from a `<robot>_moveit_config` package, grouped by category.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationSet {
    /// Root directory of the configuration package.
    pub package_path: Option<PathBuf>,
    /// `{ "<name>": <URDF> }`
    pub robot_description: ParameterMap,
    /// `{ "<name>_semantic": <SRDF> }`
    pub robot_description_semantic: ParameterMap,
    /// `{ "<name>_kinematics": <kinematics.yaml> }`
    pub robot_description_kinematics: ParameterMap,
    /// `planning_pipelines`, `default_planning_pipeline` and one entry per pipeline.
    pub planning_pipelines: ParameterMap,
    /// `moveit_manage_controllers` plus the controller manager parameters.
    pub trajectory_execution: ParameterMap,
    /// The six planning scene monitor publish flags.
    pub planning_scene_monitor: ParameterMap,
    /// Sensor plugin configuration; empty when no usable sensors file exists.
    pub sensors_3d: ParameterMap,
    /// `{ "<name>_planning": <joint_limits.yaml> }`
    pub joint_limits: ParameterMap,
    /// `moveit_cpp.yaml`, keys untouched.
    pub moveit_cpp: ParameterMap,
    /// `{ "<name>_planning": <pilz_cartesian_limits.yaml> }`, merged into
    /// the joint limits entry when flattened.
    pub pilz_cartesian_limits: ParameterMap,
    /// `capabilities` and `disable_capabilities` for move_group, as
    /// space separated plugin names. Launch files pass these to the node
    /// themselves, so they are not part of [`Self::to_parameters`].
    pub move_group_capabilities: ParameterMap,
}

impl Default for ConfigurationSet {
    fn default() -> Self {
        Self {
            package_path: None,
            robot_description: ParameterMap::new(),
            robot_description_semantic: ParameterMap::new(),
            robot_description_kinematics: ParameterMap::new(),
            planning_pipelines: ParameterMap::new(),
            trajectory_execution: ParameterMap::new(),
            planning_scene_monitor: ParameterMap::new(),
            sensors_3d: ParameterMap::new(),
            joint_limits: ParameterMap::new(),
            moveit_cpp: ParameterMap::new(),
            pilz_cartesian_limits: ParameterMap::new(),
            move_group_capabilities: move_group_capabilities("", ""),
        }
    }
}

/// The `move_group_capabilities` category for the given plugin lists.
pub fn move_group_capabilities(capabilities: &str, disable_capabilities: &str) -> ParameterMap {
    let mut map = ParameterMap::new();
    map.insert("capabilities".into(), capabilities.into());
    map.insert("disable_capabilities".into(), disable_capabilities.into());
    map
}

impl ConfigurationSet {
    pub fn new(package_path: PathBuf) -> Self {
        Self {
            package_path: Some(package_path),
            ..Self::default()
        }
    }

    /// Pipeline identifiers in load order, if pipelines have been resolved.
    pub fn pipeline_names(&self) -> Vec<String> {
        self.planning_pipelines
            .get("planning_pipelines")
            .and_then(|p| p.as_value())
            .and_then(Value::as_sequence)
            .map(|seq| {
                seq.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every category with its name, in flattening order, followed by the
    /// move_group capabilities.
    pub fn categories(&self) -> [(&'static str, &ParameterMap); 11] {
        [
            ("robot_description", &self.robot_description),
            ("robot_description_semantic", &self.robot_description_semantic),
            ("robot_description_kinematics", &self.robot_description_kinematics),
            ("planning_pipelines", &self.planning_pipelines),
            ("trajectory_execution", &self.trajectory_execution),
            ("planning_scene_monitor", &self.planning_scene_monitor),
            ("sensors_3d", &self.sensors_3d),
            ("joint_limits", &self.joint_limits),
            ("moveit_cpp", &self.moveit_cpp),
            ("pilz_cartesian_limits", &self.pilz_cartesian_limits),
            ("move_group_capabilities", &self.move_group_capabilities),
        ]
    }

    /// Flatten every category into one parameter namespace.
    ///
    /// Categories are overlaid in a fixed order with top-level replacement.
    /// The Cartesian limits are then deep merged so the shared
    /// `<name>_planning` key keeps both joint and Cartesian limits.
    pub fn to_parameters(&self) -> ParameterMap {
        let mut parameters = ParameterMap::new();
        for category in [
            &self.robot_description,
            &self.robot_description_semantic,
            &self.robot_description_kinematics,
            &self.planning_pipelines,
            &self.trajectory_execution,
            &self.planning_scene_monitor,
            &self.sensors_3d,
            &self.joint_limits,
            &self.moveit_cpp,
        ] {
            for (key, value) in category {
                parameters.insert(key.clone(), value.clone());
            }
        }
        merge_parameter_maps(&mut parameters, self.pilz_cartesian_limits.clone());
        parameters
    }
}

/// Publish flags of the planning scene monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneMonitorFlags {
    pub publish_planning_scene: bool,
    pub publish_geometry_updates: bool,
    pub publish_state_updates: bool,
    pub publish_transforms_updates: bool,
    pub publish_robot_description: bool,
    pub publish_robot_description_semantic: bool,
}

impl Default for SceneMonitorFlags {
    fn default() -> Self {
        Self {
            publish_planning_scene: true,
            publish_geometry_updates: true,
            publish_state_updates: true,
            publish_transforms_updates: true,
            publish_robot_description: false,
            publish_robot_description_semantic: false,
        }
    }
}

impl SceneMonitorFlags {
    pub fn to_parameters(&self) -> ParameterMap {
        // Flat keys: the monitor reads them from the node root, not a
        // `planning_scene_monitor` namespace.
        let mut map = ParameterMap::new();
        map.insert("publish_planning_scene".into(), self.publish_planning_scene.into());
        map.insert("publish_geometry_updates".into(), self.publish_geometry_updates.into());
        map.insert("publish_state_updates".into(), self.publish_state_updates.into());
        map.insert(
            "publish_transforms_updates".into(),
            self.publish_transforms_updates.into(),
        );
        map.insert(
            "publish_robot_description".into(),
            self.publish_robot_description.into(),
        );
        map.insert(
            "publish_robot_description_semantic".into(),
            self.publish_robot_description_semantic.into(),
        );
        map
    }
}
