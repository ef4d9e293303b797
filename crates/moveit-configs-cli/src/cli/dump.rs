//! `moveit-configs dump`: print the flattened parameter namespace.

use anyhow::Result;
use moveit_configs_types::parameter::ParameterMap;
use serde_yaml_ng::Value;

use crate::cli::Target;
use crate::state::AppState;

/// Resolve `target` and print its parameters as YAML, or JSON with `json`.
pub fn dump(
    state: &AppState,
    target: &Target,
    params: &[(String, String)],
    include_base_params: bool,
    json: bool,
) -> Result<()> {
    let parameters = flatten(state, target, params, include_base_params)?;
    print!("{}", render(&parameters, json)?);
    Ok(())
}

pub fn flatten(
    state: &AppState,
    target: &Target,
    params: &[(String, String)],
    include_base_params: bool,
) -> Result<ParameterMap> {
    let mut builder = state.builder(target)?;
    for (key, raw) in params {
        builder.parameter(key, parse_param_value(raw));
    }
    Ok(builder.flatten(include_base_params)?)
}

pub fn render(parameters: &ParameterMap, json: bool) -> Result<String> {
    if json {
        let mut out = serde_json::to_string_pretty(parameters)?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(serde_yaml_ng::to_string(parameters)?)
    }
}

/// Interpret a command line value as a YAML scalar, so `true` and `0.5` keep
/// their types. Anything unparsable stays a string.
fn parse_param_value(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::String(String::new());
    }
    serde_yaml_ng::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
