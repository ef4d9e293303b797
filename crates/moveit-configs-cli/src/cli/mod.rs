//! CLI command definitions for the `moveit-configs` binary.
//!
//! Uses clap derive macros for argument parsing. Every command takes the
//! robot name and resolves `<robot>_moveit_config` unless `--package` says
//! otherwise.

pub mod dump;
pub mod inspect;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Resolve and inspect MoveIt configuration packages.
#[derive(Parser)]
#[command(name = "moveit-configs", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of YAML or styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Only log errors; command output is still printed.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for resolved paths, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Tool configuration file (default: <config dir>/moveit-configs/config.toml).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Package location as NAME=DIR, consulted before the ament index.
    #[arg(long = "package-path", global = true, value_name = "NAME=DIR", value_parser = parse_key_value)]
    pub package_paths: Vec<(String, String)>,

    /// Directory with the bundled `<pipeline>_planning.yaml` defaults.
    #[arg(long, global = true, value_name = "DIR")]
    pub defaults_dir: Option<PathBuf>,

    /// Parameter name of the URDF (prefix of the derived keys).
    #[arg(long, global = true, value_name = "NAME")]
    pub robot_description: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// The robot whose config package is resolved.
#[derive(Args, Debug, Clone)]
pub struct Target {
    /// Robot name, e.g. `panda`.
    pub robot: String,

    /// Config package name (default: `<robot>_moveit_config`).
    #[arg(long)]
    pub package: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the flattened parameters of a config package.
    Dump {
        #[command(flatten)]
        target: Target,

        /// Leave out parameters given with --param.
        #[arg(long)]
        no_base_params: bool,

        /// Extra base parameter as KEY=VALUE; VALUE is parsed as YAML.
        #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        params: Vec<(String, String)>,
    },

    /// Show which configuration categories resolved, and to which files.
    Inspect {
        #[command(flatten)]
        target: Target,
    },

    /// List the planning pipelines and the default one.
    Pipelines {
        #[command(flatten)]
        target: Target,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Split `key=value` at the first `=`.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got `{s}`")),
    }
}
