//! Package locators: the ament resource index, a static table, and a chain
//! that consults them in order.

pub mod ament;
pub mod chain;

use std::collections::BTreeMap;
use std::path::PathBuf;

use moveit_configs_core::loader::PackageLocator;
use moveit_configs_types::error::ConfigError;

pub use ament::AmentIndexLocator;
pub use chain::{ChainedLocator, build_locator_chain};

/// Package name to share directory, fixed at construction.
///
/// Useful for workspaces that are not installed, and for pointing a package
/// name at a checkout.
#[derive(Debug, Clone, Default)]
pub struct StaticPackageLocator {
    packages: BTreeMap<String, PathBuf>,
}

impl StaticPackageLocator {
    pub fn new(packages: BTreeMap<String, PathBuf>) -> Self {
        Self { packages }
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl PackageLocator for StaticPackageLocator {
    fn package_share_directory(&self, package: &str) -> Result<PathBuf, ConfigError> {
        self.packages
            .get(package)
            .cloned()
            .ok_or_else(|| ConfigError::PackageNotFound(package.to_string()))
    }
}
