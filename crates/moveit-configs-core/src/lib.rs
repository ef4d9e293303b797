//! File resolution and parameter merging for MoveIt configuration packages.
//!
//! This crate defines the collaborator "ports" (package lookup, YAML loading,
//! xacro expansion) that the infrastructure layer implements, and the
//! [`builder::MoveItConfigsBuilder`] that resolves a `<robot>_moveit_config`
//! package into a [`moveit_configs_types::configs::ConfigurationSet`]. It
//! never touches a YAML parser or the xacro engine directly.

pub mod builder;
pub mod loader;
pub mod scan;
pub mod setup_assistant;

#[cfg(test)]
pub(crate) mod test_support;
