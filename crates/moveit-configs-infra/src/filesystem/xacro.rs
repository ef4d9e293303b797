//! Xacro expansion through the `xacro` command line tool.
//!
//! Every description file is passed to the tool as
//! `xacro <file> key:=value ...` and its stdout becomes the document. Plain
//! URDF and SRDF files come back unchanged, but `.srdf` files that pull in
//! xacro includes still get expanded.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use indexmap::IndexMap;
use moveit_configs_core::loader::MacroExpander;
use moveit_configs_types::error::ConfigError;

const XACRO_PROGRAM: &str = "xacro";

/// Runs an external xacro processor.
pub struct XacroCommandExpander {
    program: OsString,
    leading_args: Vec<OsString>,
}

impl XacroCommandExpander {
    /// Use the `xacro` executable found on `PATH`.
    pub fn new() -> Self {
        Self::with_command(XACRO_PROGRAM, Vec::<OsString>::new())
    }

    /// Build from a `[program, args...]` command line; an empty one means
    /// the `xacro` executable.
    pub fn from_command_line(command: &[String]) -> Self {
        match command.split_first() {
            Some((program, leading_args)) => Self::with_command(program, leading_args),
            None => Self::new(),
        }
    }

    /// Use `program`, passing `leading_args` before the file and mappings.
    pub fn with_command(
        program: impl Into<OsString>,
        leading_args: impl IntoIterator<Item = impl Into<OsString>>,
    ) -> Self {
        Self {
            program: program.into(),
            leading_args: leading_args.into_iter().map(Into::into).collect(),
        }
    }

    fn run(&self, path: &Path, args: &IndexMap<String, String>) -> Result<String, ConfigError> {
        let expansion_error = |message: String| ConfigError::MacroExpansion {
            path: path.to_path_buf(),
            message,
        };

        tracing::debug!(path = %path.display(), args = args.len(), "running xacro");
        let output = Command::new(&self.program)
            .args(&self.leading_args)
            .arg(path)
            .args(args.iter().map(|(key, value)| format!("{key}:={value}")))
            .output()
            .map_err(|e| {
                expansion_error(format!(
                    "could not run `{}`: {e}",
                    self.program.to_string_lossy()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(expansion_error(format!(
                "`{}` exited with {}: {}",
                self.program.to_string_lossy(),
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| expansion_error(format!("output is not valid UTF-8: {e}")))
    }
}

impl Default for XacroCommandExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl MacroExpander for XacroCommandExpander {
    fn expand(&self, path: &Path, args: &IndexMap<String, String>) -> Result<String, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        self.run(path, args)
    }
}
