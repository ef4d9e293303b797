//! Directory scanning by file name pattern.
//!
//! Used to infer pipeline and controller names from files such as
//! `ompl_planning.yaml` or `moveit_controllers.yaml`. Results are sorted by
//! file name because `read_dir` order is platform dependent.

use std::path::{Path, PathBuf};

use moveit_configs_types::error::ConfigError;
use regex::Regex;

/// One file whose name matched the pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternMatch {
    /// First capture group, when the pattern defines one.
    Capture(String),
    /// Full path of the matching file, when the pattern has no groups.
    Path(PathBuf),
}

impl PatternMatch {
    pub fn as_capture(&self) -> Option<&str> {
        match self {
            PatternMatch::Capture(name) => Some(name),
            PatternMatch::Path(_) => None,
        }
    }
}

/// Find the regular files in `folder` whose names match `pattern`.
///
/// A missing folder yields no matches rather than an error. Only the direct
/// children of `folder` are considered.
pub fn pattern_matches(folder: &Path, pattern: &Regex) -> Result<Vec<PatternMatch>, ConfigError> {
    if !folder.exists() {
        return Ok(Vec::new());
    }

    let io_err = |source| ConfigError::Io {
        path: folder.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    let has_groups = pattern.captures_len() > 1;
    let mut matches = Vec::new();
    for path in files {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(captures) = pattern.captures(name) else {
            continue;
        };
        if has_groups {
            // An optional group that did not participate captures nothing.
            let group = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
            matches.push(PatternMatch::Capture(group.to_string()));
        } else {
            matches.push(PatternMatch::Path(path));
        }
    }
    Ok(matches)
}

/// Like [`pattern_matches`], keeping only the captured names.
pub fn captured_names(folder: &Path, pattern: &Regex) -> Result<Vec<String>, ConfigError> {
    Ok(pattern_matches(folder, pattern)?
        .into_iter()
        .filter_map(|m| m.as_capture().map(str::to_string))
        .collect())
}
