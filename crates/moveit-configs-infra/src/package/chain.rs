//! Locator chain builder: wires concrete locators in priority order.
//!
//! Default chain order: `[StaticPackageLocator, AmentIndexLocator]`

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use moveit_configs_core::loader::{DynPackageLocator, PackageLocator};
use moveit_configs_types::error::ConfigError;

use super::{AmentIndexLocator, StaticPackageLocator};

/// Asks each locator in turn; the first one that knows the package wins.
///
/// Only [`ConfigError::PackageNotFound`] falls through to the next locator;
/// any other error is returned immediately.
#[derive(Clone, Default)]
pub struct ChainedLocator {
    chain: Vec<DynPackageLocator>,
}

impl ChainedLocator {
    pub fn new(chain: Vec<DynPackageLocator>) -> Self {
        Self { chain }
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}

impl PackageLocator for ChainedLocator {
    fn package_share_directory(&self, package: &str) -> Result<PathBuf, ConfigError> {
        for locator in &self.chain {
            match locator.package_share_directory(package) {
                Err(ConfigError::PackageNotFound(_)) => continue,
                result => return result,
            }
        }
        Err(ConfigError::PackageNotFound(package.to_string()))
    }
}

/// Build the default package resolution chain.
///
/// 1. Explicit `package_paths` (if any)
/// 2. The ament index from `AMENT_PREFIX_PATH` (if `include_ament` is true)
pub fn build_locator_chain(
    package_paths: BTreeMap<String, PathBuf>,
    include_ament: bool,
) -> ChainedLocator {
    let mut chain: Vec<DynPackageLocator> = Vec::new();

    let explicit = StaticPackageLocator::new(package_paths);
    if !explicit.is_empty() {
        chain.push(Arc::new(explicit));
    }

    if include_ament {
        chain.push(Arc::new(AmentIndexLocator::from_env()));
    }

    ChainedLocator::new(chain)
}
