//! Package lookup through the ament resource index.
//!
//! An installed package `<name>` under prefix `<prefix>` leaves a marker file
//! at `<prefix>/share/ament_index/resource_index/packages/<name>`; its share
//! directory is `<prefix>/share/<name>`. Prefixes come from
//! `AMENT_PREFIX_PATH` and are searched in order.

use std::ffi::OsStr;
use std::path::PathBuf;

use moveit_configs_core::loader::PackageLocator;
use moveit_configs_types::error::ConfigError;

/// Environment variable listing install prefixes.
pub const AMENT_PREFIX_PATH: &str = "AMENT_PREFIX_PATH";

const PACKAGES_MARKER_DIR: &str = "share/ament_index/resource_index/packages";

#[derive(Debug, Clone, Default)]
pub struct AmentIndexLocator {
    prefixes: Vec<PathBuf>,
}

impl AmentIndexLocator {
    pub fn new(prefixes: Vec<PathBuf>) -> Self {
        Self { prefixes }
    }

    /// Prefixes from `AMENT_PREFIX_PATH`; none if it is unset.
    pub fn from_env() -> Self {
        match std::env::var_os(AMENT_PREFIX_PATH) {
            Some(value) => Self::from_prefix_path(&value),
            None => {
                tracing::debug!("{AMENT_PREFIX_PATH} is not set, the ament index is empty");
                Self::default()
            }
        }
    }

    /// Parse a platform path list such as `/ws/install:/opt/ros/jazzy`.
    pub fn from_prefix_path(value: &OsStr) -> Self {
        Self::new(
            std::env::split_paths(value)
                .filter(|prefix| !prefix.as_os_str().is_empty())
                .collect(),
        )
    }

    pub fn prefixes(&self) -> &[PathBuf] {
        &self.prefixes
    }
}

impl PackageLocator for AmentIndexLocator {
    fn package_share_directory(&self, package: &str) -> Result<PathBuf, ConfigError> {
        self.prefixes
            .iter()
            .find(|prefix| prefix.join(PACKAGES_MARKER_DIR).join(package).is_file())
            .map(|prefix| prefix.join("share").join(package))
            .ok_or_else(|| ConfigError::PackageNotFound(package.to_string()))
    }
}
