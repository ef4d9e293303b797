//! Parameter values as handed to the planning runtime.
//!
//! Most parameters are plain YAML values. Robot descriptions expanded from
//! xacro with launch-time substitutions cannot be produced here; they are
//! carried as [`DeferredExpansion`] handles that the runtime finishes later.

use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_yaml_ng::Value;

/// Insertion-ordered mapping from parameter name to value.
pub type ParameterMap = IndexMap<String, ParameterValue>;

/// One xacro argument key or value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Substitution {
    /// A concrete string known at build time.
    Literal(String),
    /// A launch substitution expression (e.g. `$(var use_sim)`) only the
    /// runtime can evaluate.
    Expression(String),
}

impl Substitution {
    pub fn literal(value: impl Into<String>) -> Self {
        Substitution::Literal(value.into())
    }

    pub fn expression(value: impl Into<String>) -> Self {
        Substitution::Expression(value.into())
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Substitution::Literal(s) => Some(s),
            Substitution::Expression(_) => None,
        }
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Substitution::Literal(s) | Substitution::Expression(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for Substitution {
    fn from(value: &str) -> Self {
        Substitution::Literal(value.to_string())
    }
}

impl From<String> for Substitution {
    fn from(value: String) -> Self {
        Substitution::Literal(value)
    }
}

/// Xacro argument mappings, in the order the caller supplied them.
pub type MacroMappings = Vec<(Substitution, Substitution)>;

/// A xacro expansion left for the runtime to evaluate, producing a string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeferredExpansion {
    pub file: PathBuf,
    pub mappings: MacroMappings,
}

/// Either a concrete parsed value or a deferred macro expansion.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Value(Value),
    Deferred(DeferredExpansion),
}

impl ParameterValue {
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            ParameterValue::Value(v) => Some(v),
            ParameterValue::Deferred(_) => None,
        }
    }

    pub fn as_deferred(&self) -> Option<&DeferredExpansion> {
        match self {
            ParameterValue::Value(_) => None,
            ParameterValue::Deferred(d) => Some(d),
        }
    }

    /// Look up a nested key when this value is a mapping.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_value()?.as_mapping()?.get(key)
    }
}

impl From<Value> for ParameterValue {
    fn from(value: Value) -> Self {
        ParameterValue::Value(value)
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        ParameterValue::Value(Value::Bool(value))
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::Value(Value::String(value.to_string()))
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::Value(Value::String(value))
    }
}

impl From<DeferredExpansion> for ParameterValue {
    fn from(value: DeferredExpansion) -> Self {
        ParameterValue::Deferred(value)
    }
}

impl Serialize for ParameterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParameterValue::Value(v) => v.serialize(serializer),
            ParameterValue::Deferred(d) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("deferred_xacro", d)?;
                map.end()
            }
        }
    }
}
