//! Deep merge of nested parameter mappings.
//!
//! Two categories (joint limits and Pilz Cartesian limits) write under the same
//! `<name>_planning` key. Overlaying them must combine their nested mappings,
//! so overlapping mappings are merged recursively while scalars, sequences and
//! deferred values at the leaves are replaced by the overlay.

use serde_yaml_ng::{Mapping, Value};

use crate::parameter::{ParameterMap, ParameterValue};

/// Overlay `overlay` onto `base`, recursing where both sides are mappings.
pub fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            merge_mappings(base_map, overlay_map)
        }
        (slot, overlay) => *slot = overlay,
    }
}

/// Overlay every entry of `overlay` onto `base`.
pub fn merge_mappings(base: &mut Mapping, overlay: Mapping) {
    for (key, value) in overlay {
        match base.get_mut(&key) {
            Some(existing) => merge_values(existing, value),
            None => {
                base.insert(key, value);
            }
        }
    }
}

/// Deep merge at the [`ParameterValue`] level. Deferred values never merge.
pub fn merge_parameter(base: &mut ParameterValue, overlay: ParameterValue) {
    match (base, overlay) {
        (ParameterValue::Value(base_value), ParameterValue::Value(overlay_value)) => {
            merge_values(base_value, overlay_value)
        }
        (slot, overlay) => *slot = overlay,
    }
}

/// Deep merge every top-level entry of `overlay` into `base`.
pub fn merge_parameter_maps(base: &mut ParameterMap, overlay: ParameterMap) {
    for (key, value) in overlay {
        match base.get_mut(&key) {
            Some(existing) => merge_parameter(existing, value),
            None => {
                base.insert(key, value);
            }
        }
    }
}
