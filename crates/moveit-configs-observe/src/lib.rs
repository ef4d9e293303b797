//! Logging setup shared by the `moveit-configs` binaries.

pub mod tracing_setup;
