//! Shared fixtures for builder tests: in-test collaborators and a temporary
//! config package laid out like a setup assistant export.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use moveit_configs_types::error::ConfigError;
use serde_yaml_ng::Value;
use tempfile::TempDir;

use crate::builder::{BuilderOptions, MoveItConfigsBuilder};
use crate::loader::{Collaborators, MacroExpander, PackageLocator, YamlLoader};

pub struct MapLocator(pub HashMap<String, PathBuf>);

impl PackageLocator for MapLocator {
    fn package_share_directory(&self, package: &str) -> Result<PathBuf, ConfigError> {
        self.0
            .get(package)
            .cloned()
            .ok_or_else(|| ConfigError::PackageNotFound(package.to_string()))
    }
}

pub struct FsYaml;

impl YamlLoader for FsYaml {
    fn load_yaml(&self, path: &Path) -> Result<Value, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound(path.to_path_buf())
            } else {
                ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        serde_yaml_ng::from_str(&content).map_err(|e| ConfigError::Yaml {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Returns the file content followed by one `<!-- key=value -->` line per argument.
pub struct EchoExpander;

impl MacroExpander for EchoExpander {
    fn expand(&self, path: &Path, args: &IndexMap<String, String>) -> Result<String, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        let mut content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        for (key, value) in args {
            content.push_str(&format!("\n<!-- {key}={value} -->"));
        }
        Ok(content)
    }
}

pub const ROBOT: &str = "panda";

/// A temporary workspace holding `panda_moveit_config` and a bundled
/// defaults directory under `moveit_configs_utils/default_configs`.
pub struct Fixture {
    pub tmp: TempDir,
    pub packages: HashMap<String, PathBuf>,
}

impl Fixture {
    pub fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let mut packages = HashMap::new();
        for name in ["panda_moveit_config", "moveit_configs_utils"] {
            let dir = tmp.path().join(name);
            std::fs::create_dir_all(&dir).unwrap();
            packages.insert(name.to_string(), dir);
        }
        let fixture = Self { tmp, packages };
        fixture.write_default("ompl_planning.yaml", "planning_plugins: [ompl_interface/OMPLPlanner]\n");
        fixture.write_default("chomp_planning.yaml", "planning_plugins: [chomp_interface/CHOMPPlanner]\n");
        fixture.write_default(
            "pilz_industrial_motion_planner_planning.yaml",
            "planning_plugins: [pilz_industrial_motion_planner/CommandPlanner]\n",
        );
        fixture.write_default(
            "ompl_defaults.yaml",
            "planner_configs:\n  RRTConnectkConfigDefault:\n    type: geometric::RRTConnect\n",
        );
        fixture
    }

    /// A fixture with the files every `build_all` run needs.
    pub fn complete() -> Self {
        let fixture = Self::new();
        fixture.write("config/panda.urdf", "<robot name=\"panda\"/>");
        fixture.write("config/panda.srdf", "<robot name=\"panda\"><group name=\"arm\"/></robot>");
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
        // The bundled defaults include pilz, so build_all loads Cartesian limits.
        fixture.write(
            "config/pilz_cartesian_limits.yaml",
            "cartesian_limits:\n  max_trans_vel: 1.0\n  max_rot_vel: 1.57\n",
        );
        fixture
    }

    pub fn package(&self) -> PathBuf {
        self.packages["panda_moveit_config"].clone()
    }

    pub fn defaults_dir(&self) -> PathBuf {
        self.packages["moveit_configs_utils"].join("default_configs")
    }

    pub fn add_package(&mut self, name: &str) -> PathBuf {
        let dir = self.tmp.path().join(name);
        std::fs::create_dir_all(&dir).unwrap();
        self.packages.insert(name.to_string(), dir.clone());
        dir
    }

    pub fn write(&self, relative: &str, content: &str) {
        write_file(&self.package().join(relative), content);
    }

    pub fn write_default(&self, name: &str, content: &str) {
        write_file(&self.defaults_dir().join(name), content);
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators::new(MapLocator(self.packages.clone()), FsYaml, EchoExpander)
    }

    pub fn builder(&self) -> MoveItConfigsBuilder {
        self.try_builder().unwrap()
    }

    pub fn try_builder(&self) -> Result<MoveItConfigsBuilder, ConfigError> {
        MoveItConfigsBuilder::new(ROBOT, self.collaborators(), BuilderOptions::default())
    }
}

pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

pub fn yaml(s: &str) -> Value {
    serde_yaml_ng::from_str(s).unwrap()
}
