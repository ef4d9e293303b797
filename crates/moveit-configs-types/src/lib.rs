//! Shared parameter and configuration types for the MoveIt config builder.
//!
//! This crate holds the data model produced by the resolver in
//! `moveit-configs-core`: the per-category [`configs::ConfigurationSet`], the
//! [`parameter::ParameterValue`] tagged union and the deep-merge rules used when
//! categories share a top-level key.
//!
//! Zero infrastructure dependencies -- only serde, serde_yaml_ng, indexmap, thiserror.

pub mod config;
pub mod configs;
pub mod error;
pub mod merge;
pub mod parameter;
