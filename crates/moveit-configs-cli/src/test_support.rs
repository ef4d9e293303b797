//! A complete `panda_moveit_config` in a temporary directory, resolved
//! against the bundled `default_configs/`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use moveit_configs_types::config::ToolConfig;
use tempfile::TempDir;

use crate::cli::Target;
use crate::state::AppState;

pub struct PackageFixture {
    pub tmp: TempDir,
}

impl PackageFixture {
    pub fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let fixture = Self { tmp };
        fixture.write("config/panda.urdf", "<robot name=\"panda\"><link name=\"panda_link0\"/></robot>\n");
        fixture.write("config/panda.srdf", "<robot name=\"panda\"><group name=\"panda_arm\"/></robot>\n");
        fixture.write(
            "config/kinematics.yaml",
            "panda_arm:\n  kinematics_solver: kdl_kinematics_plugin/KDLKinematicsPlugin\n",
        );
        fixture.write(
            "config/joint_limits.yaml",
            "joint_limits:\n  panda_joint1:\n    has_velocity_limits: true\n    max_velocity: 2.175\n",
        );
        fixture.write(
            "config/moveit_controllers.yaml",
            "moveit_controller_manager: moveit_simple_controller_manager/MoveItSimpleControllerManager\n",
        );
        fixture.write(
            "config/pilz_cartesian_limits.yaml",
            "cartesian_limits:\n  max_trans_vel: 1.0\n  max_trans_acc: 2.25\n  max_trans_dec: -5.0\n  max_rot_vel: 1.57\n",
        );
        fixture
    }

    pub fn package(&self) -> PathBuf {
        self.tmp.path().join("panda_moveit_config")
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.package().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    pub fn state(&self) -> AppState {
        let config = ToolConfig {
            package_paths: BTreeMap::from([("panda_moveit_config".to_string(), self.package())]),
            // Pass-through stand-in for xacro.
            xacro_command: ["sh", "-c", "cat \"$0\""].map(String::from).to_vec(),
            ..ToolConfig::default()
        };
        AppState::from_config(config, Some(bundled_defaults()))
    }

    pub fn target(&self) -> Target {
        Target {
            robot: "panda".to_string(),
            package: None,
        }
    }
}

fn bundled_defaults() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../default_configs")
}
