//! `.setup_assistant` metadata parsing.
//!
//! The setup assistant records which URDF and SRDF a config package was
//! generated from:
//!
//! ```text
//! moveit_setup_assistant_config:
//!   URDF:
//!     package: moveit_resources_panda_description
//!     relative_path: urdf/panda.urdf
//!     xacro_args: "hand:=true use_fake_hardware:=false"
//!   SRDF:
//!     relative_path: config/panda.srdf
//! ```
//!
//! Both lower- and upper-case section names are accepted.

use std::path::PathBuf;

use indexmap::IndexMap;
use moveit_configs_types::error::ConfigError;
use serde_yaml_ng::{Mapping, Value};

/// File name of the metadata file at the package root.
pub const SETUP_ASSISTANT_FILE: &str = ".setup_assistant";

/// Where the package's robot description came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrdfSource {
    pub package: Option<String>,
    pub relative_path: Option<PathBuf>,
    pub xacro_args: Option<IndexMap<String, String>>,
}

/// Parsed `.setup_assistant` content relevant to file resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetupAssistantInfo {
    pub urdf: Option<UrdfSource>,
    /// SRDF path relative to the config package.
    pub srdf_relative_path: Option<PathBuf>,
}

impl SetupAssistantInfo {
    /// Extract the URDF/SRDF entries from a loaded `.setup_assistant` document.
    pub fn from_yaml(document: &Value) -> Result<Self, ConfigError> {
        let Some(config) = document
            .get("moveit_setup_assistant_config")
            .and_then(Value::as_mapping)
        else {
            return Ok(Self::default());
        };

        let urdf = match section(config, "urdf", "URDF") {
            Some(urdf) => Some(UrdfSource {
                package: string_field(urdf, "package"),
                relative_path: string_field(urdf, "relative_path").map(PathBuf::from),
                xacro_args: match string_field(urdf, "xacro_args") {
                    Some(args) if !args.is_empty() => Some(parse_xacro_args(&args)?),
                    _ => None,
                },
            }),
            None => None,
        };

        let srdf_relative_path = section(config, "srdf", "SRDF")
            .and_then(|srdf| string_field(srdf, "relative_path"))
            .map(PathBuf::from);

        Ok(Self {
            urdf,
            srdf_relative_path,
        })
    }
}

fn section<'a>(config: &'a Mapping, lower: &str, upper: &str) -> Option<&'a Mapping> {
    config
        .get(lower)
        .or_else(|| config.get(upper))
        .and_then(Value::as_mapping)
}

fn string_field(section: &Mapping, key: &str) -> Option<String> {
    section.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Parse a space-separated `key:=value` argument string.
///
/// Empty tokens (repeated spaces) are ignored; a token without `:=` is an
/// error.
pub fn parse_xacro_args(args: &str) -> Result<IndexMap<String, String>, ConfigError> {
    args.split(' ')
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .split_once(":=")
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .ok_or_else(|| ConfigError::InvalidXacroArgs(token.to_string()))
        })
        .collect()
}
