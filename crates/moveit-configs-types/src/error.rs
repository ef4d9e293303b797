use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while resolving a MoveIt configuration package.
///
/// Every message names the file or option at fault so the package can be
/// fixed without reading a backtrace.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("package '{0}' not found")]
    PackageNotFound(String),

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML {}: {message}", .path.display())]
    Yaml { path: PathBuf, message: String },

    #[error("failed to expand {}: {message}", .path.display())]
    MacroExpansion { path: PathBuf, message: String },

    #[error("unexpected content in {}: expected {expected}", .path.display())]
    InvalidShape {
        path: PathBuf,
        expected: &'static str,
    },

    #[error("invalid xacro argument '{0}' (expected key:=value)")]
    InvalidXacroArgs(String),

    #[error(
        "trajectory_execution: Unable to guess which parameter file to load. Options:\n - {}",
        .candidates.join("\n - ")
    )]
    AmbiguousControllers { candidates: Vec<String> },

    #[error(
        "default_planning_pipeline: `{default}` doesn't name any of the input pipelines `{}`",
        .pipelines.join(",")
    )]
    UnknownDefaultPipeline {
        default: String,
        pipelines: Vec<String>,
    },

    #[error("planning_pipelines: no *_planning.yaml files found in {}", .config_dir.display())]
    NoPlanningPipelines { config_dir: PathBuf },
}

impl ConfigError {
    /// Whether this error reports a missing input file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::FileNotFound(_))
    }
}
