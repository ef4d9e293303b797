//! Application state shared by the commands.
//!
//! AppState pins the builder's collaborators to the concrete infra adapters
//! and carries the merged tool configuration.

use std::path::PathBuf;

use moveit_configs_core::builder::{BuilderOptions, MoveItConfigsBuilder};
use moveit_configs_core::loader::Collaborators;
use moveit_configs_infra::config::{load_tool_config_or_default, resolve_defaults_dir};
use moveit_configs_infra::system_collaborators;
use moveit_configs_types::config::ToolConfig;

use crate::cli::{Cli, Target};

#[derive(Clone)]
pub struct AppState {
    pub config: ToolConfig,
    pub defaults_dir: Option<PathBuf>,
    pub collaborators: Collaborators,
}

impl AppState {
    /// Load `config.toml` and apply the command line overrides on top.
    pub fn init(cli: &Cli) -> Self {
        let mut config = load_tool_config_or_default(cli.config.as_deref());
        for (name, dir) in &cli.package_paths {
            config.package_paths.insert(name.clone(), PathBuf::from(dir));
        }
        if let Some(name) = &cli.robot_description {
            config.robot_description = name.clone();
        }
        Self::from_config(config, cli.defaults_dir.clone())
    }

    pub fn from_config(config: ToolConfig, defaults_dir: Option<PathBuf>) -> Self {
        let defaults_dir = resolve_defaults_dir(defaults_dir, &config);
        let collaborators = system_collaborators(&config);
        Self {
            config,
            defaults_dir,
            collaborators,
        }
    }

    /// A builder for `target`, with nothing loaded yet.
    pub fn builder(&self, target: &Target) -> anyhow::Result<MoveItConfigsBuilder> {
        let options = BuilderOptions {
            package_name: target.package.clone(),
            robot_description: self.config.robot_description.clone(),
            defaults_dir: self.defaults_dir.clone(),
        };
        let builder = MoveItConfigsBuilder::new(&target.robot, self.collaborators.clone(), options)?;
        tracing::info!(
            robot = %target.robot,
            package = %builder.package_path().display(),
            "config package located"
        );
        Ok(builder)
    }
}
