//! Tool configuration for the `moveit-configs` front end.
//!
//! `ToolConfig` represents an optional `config.toml` that pins the bundled
//! defaults directory, the robot description parameter name, extra package
//! locations and the xacro command. All fields have defaults.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Parameter name the URDF is loaded under unless configured otherwise.
pub const DEFAULT_ROBOT_DESCRIPTION: &str = "robot_description";

/// Program used to expand URDF and SRDF files.
pub const DEFAULT_XACRO_COMMAND: &str = "xacro";

/// Top-level tool configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Directory holding the bundled `<pipeline>_planning.yaml` and
    /// `ompl_defaults.yaml` files.
    #[serde(default)]
    pub defaults_dir: Option<PathBuf>,

    /// Parameter name for the robot description; also the prefix for the
    /// `_semantic`, `_kinematics` and `_planning` keys.
    #[serde(default = "default_robot_description")]
    pub robot_description: String,

    /// Package name to share directory, consulted before the ament index.
    #[serde(default)]
    pub package_paths: BTreeMap<String, PathBuf>,

    /// `[program, args...]` run as `<command> <file> key:=value ...`.
    #[serde(default = "default_xacro_command")]
    pub xacro_command: Vec<String>,
}

fn default_robot_description() -> String {
    DEFAULT_ROBOT_DESCRIPTION.to_string()
}

fn default_xacro_command() -> Vec<String> {
    vec![DEFAULT_XACRO_COMMAND.to_string()]
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            defaults_dir: None,
            robot_description: default_robot_description(),
            package_paths: BTreeMap::new(),
            xacro_command: default_xacro_command(),
        }
    }
}
