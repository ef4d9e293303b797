//! Infrastructure layer for the MoveIt config builder.
//!
//! Contains implementations of the collaborator traits defined in
//! `moveit-configs-core`: a `serde_yaml_ng` file loader, an external xacro
//! expander, ament index and static package locators, plus the
//! `config.toml` loader for the command line tool.

pub mod config;
pub mod filesystem;
pub mod package;

use moveit_configs_core::loader::Collaborators;
use moveit_configs_types::config::ToolConfig;

use crate::filesystem::YamlFileLoader;
use crate::filesystem::xacro::XacroCommandExpander;
use crate::package::build_locator_chain;

/// Wire the real adapters: `package_paths` from `config` first, then the
/// ament index. Descriptions go through `config.xacro_command`.
pub fn system_collaborators(config: &ToolConfig) -> Collaborators {
    Collaborators::new(
        build_locator_chain(config.package_paths.clone(), true),
        YamlFileLoader::new(),
        XacroCommandExpander::from_command_line(&config.xacro_command),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};

    use moveit_configs_core::builder::{BuilderOptions, MoveItConfigsBuilder};
    use serde_yaml_ng::Value;
    use tempfile::TempDir;

    fn bundled_defaults() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../default_configs")
    }

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn resolves_a_package_with_the_real_adapters() {
        let tmp = TempDir::new().unwrap();
        let package = tmp.path().join("panda_moveit_config");
        write(&package, "config/panda.urdf", "<robot name=\"panda\"/>");
        write(&package, "config/panda.srdf", "<robot name=\"panda\"/>");
        write(&package, "config/kinematics.yaml", "panda_arm: {kinematics_solver_timeout: 0.005}\n");
        write(&package, "config/joint_limits.yaml", "default_velocity_scaling_factor: 0.1\n");
        write(&package, "config/pilz_cartesian_limits.yaml", "cartesian_limits: {max_trans_vel: 1.0}\n");
        write(&package, "config/sensors_3d.yaml", "sensors: [null]\n");

        let config = ToolConfig {
            package_paths: BTreeMap::from([("panda_moveit_config".to_string(), package.clone())]),
            // Pass-through stand-in for xacro.
            xacro_command: ["sh", "-c", "cat \"$0\""].map(String::from).to_vec(),
            ..ToolConfig::default()
        };
        let options = BuilderOptions {
            defaults_dir: Some(bundled_defaults()),
            ..BuilderOptions::default()
        };
        let mut builder =
            MoveItConfigsBuilder::new("panda", system_collaborators(&config), options).unwrap();
        let params = builder.flatten(false).unwrap();

        assert_eq!(
            params["robot_description"].as_value(),
            Some(&Value::String("<robot name=\"panda\"/>".to_string()))
        );
        assert_eq!(
            params["planning_pipelines"].as_value(),
            Some(&serde_yaml_ng::from_str::<Value>(
                "[chomp, ompl, pilz_industrial_motion_planner, stomp]"
            )
            .unwrap())
        );
        assert_eq!(
            params["default_planning_pipeline"].as_value().and_then(Value::as_str),
            Some("ompl")
        );
        // ompl_planning.yaml has no planner_configs, so the bundled ones are added.
        assert!(params["ompl"]
            .get("planner_configs")
            .and_then(|c| c.get("RRTConnectkConfigDefault"))
            .is_some());
        let planning = &params["robot_description_planning"];
        assert!(planning.get("default_velocity_scaling_factor").is_some());
        assert!(planning.get("cartesian_limits").is_some());
        assert!(!params.contains_key("sensors"));
    }
}
