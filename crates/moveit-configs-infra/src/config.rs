//! Tool configuration loader for `moveit-configs`.
//!
//! Reads `config.toml` from the platform config directory
//! (`~/.config/moveit-configs/` on Linux) or an explicit path and
//! deserializes it into [`ToolConfig`]. Falls back to defaults when the file
//! is missing or malformed.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use moveit_configs_types::config::ToolConfig;

/// Environment variable overriding the bundled defaults directory.
pub const DEFAULTS_DIR_ENV: &str = "MOVEIT_CONFIGS_DEFAULTS_DIR";

const APP_DIR: &str = "moveit-configs";
const CONFIG_FILE: &str = "config.toml";

/// `<platform config dir>/moveit-configs/config.toml`, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Read `config_path` as TOML.
///
/// A missing file quietly yields [`ToolConfig::default()`]. An unreadable or
/// invalid file is logged as a warning and also yields the defaults.
pub fn load_tool_config(config_path: &Path) -> ToolConfig {
    let path = config_path.display();
    let content = match std::fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(err) => {
            if err.kind() == std::io::ErrorKind::NotFound {
                tracing::debug!(%path, "no tool config, using defaults");
            } else {
                tracing::warn!(%path, %err, "cannot read tool config, using defaults");
            }
            return ToolConfig::default();
        }
    };
    toml::from_str(&content).unwrap_or_else(|err| {
        tracing::warn!(%path, %err, "invalid tool config, using defaults");
        ToolConfig::default()
    })
}

/// Load from `explicit`, else from [`default_config_path`].
pub fn load_tool_config_or_default(explicit: Option<&Path>) -> ToolConfig {
    match explicit.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) => load_tool_config(&path),
        None => ToolConfig::default(),
    }
}

/// Resolve the bundled defaults directory.
///
/// Priority:
/// 1. Command line override
/// 2. `MOVEIT_CONFIGS_DEFAULTS_DIR`
/// 3. `defaults_dir` from `config.toml`
///
/// `None` leaves the choice to the builder, which looks up the
/// `moveit_configs_utils` package.
pub fn resolve_defaults_dir(cli: Option<PathBuf>, config: &ToolConfig) -> Option<PathBuf> {
    pick_defaults_dir(cli, std::env::var_os(DEFAULTS_DIR_ENV), config)
}

fn pick_defaults_dir(
    cli: Option<PathBuf>,
    env: Option<OsString>,
    config: &ToolConfig,
) -> Option<PathBuf> {
    cli.or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
        .or_else(|| config.defaults_dir.clone())
}
