//! `moveit-configs inspect` and `moveit-configs pipelines`.

use anyhow::Result;
use console::style;
use moveit_configs_types::configs::ConfigurationSet;
use moveit_configs_types::parameter::ParameterValue;

use crate::cli::Target;
use crate::state::AppState;

/// Show each category with the parameter keys it resolved to.
pub fn inspect(state: &AppState, target: &Target, json: bool) -> Result<()> {
    let mut builder = state.builder(target)?;
    let urdf = builder.urdf_path();
    let srdf = builder.srdf_path();
    let configs = builder.build_all()?;

    if json {
        let categories: serde_json::Map<String, serde_json::Value> = configs
            .categories()
            .iter()
            .map(|(name, params)| {
                let keys = params.keys().cloned().map(serde_json::Value::String).collect();
                (name.to_string(), serde_json::Value::Array(keys))
            })
            .collect();
        let report = serde_json::json!({
            "robot": target.robot,
            "package_path": configs.package_path.as_ref().map(|p| p.display().to_string()),
            "urdf": urdf.display().to_string(),
            "srdf": srdf.display().to_string(),
            "categories": categories,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} MoveIt config for '{}'",
        style("🤖").bold(),
        style(&target.robot).cyan()
    );
    if let Some(path) = &configs.package_path {
        println!("  Package: {}", style(path.display()).dim());
    }
    println!("  URDF:    {}", style(urdf.display()).dim());
    println!("  SRDF:    {}", style(srdf.display()).dim());
    println!();

    println!("  {}", style("── Categories ──").dim());
    for (name, params) in configs.categories() {
        let mark = if params.is_empty() {
            format!("{}", style("✗").dim())
        } else {
            format!("{}", style("✓").green())
        };
        let keys = summarize_keys(params.keys().map(String::as_str));
        println!("  {mark} {:<30} {}", name, style(keys).dim());
    }
    println!();

    Ok(())
}

/// Print the pipeline list with the default one highlighted.
pub fn pipelines(state: &AppState, target: &Target, json: bool) -> Result<()> {
    let mut builder = state.builder(target)?;
    builder.resolve_planning_pipelines(None, None, true)?;
    let configs = builder.configs();
    let names = configs.pipeline_names();
    let default = default_pipeline(configs);

    if json {
        let report = serde_json::json!({
            "pipelines": names,
            "default": default,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    for name in &names {
        if Some(name.as_str()) == default.as_deref() {
            println!("  {} {} {}", style("●").green(), style(name).bold(), style("(default)").dim());
        } else {
            println!("  {} {}", style("○").dim(), name);
        }
    }
    println!();
    Ok(())
}

fn default_pipeline(configs: &ConfigurationSet) -> Option<String> {
    match configs.planning_pipelines.get("default_planning_pipeline") {
        Some(ParameterValue::Value(value)) => value.as_str().map(str::to_string),
        _ => None,
    }
}

/// At most four keys, then a count of the rest.
fn summarize_keys<'a>(keys: impl Iterator<Item = &'a str>) -> String {
    let keys: Vec<&str> = keys.collect();
    match keys.len() {
        0 => "-".to_string(),
        n if n <= 4 => keys.join(", "),
        n => format!("{}, ... (+{})", keys[..4].join(", "), n - 4),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::PackageFixture;

    #[test]
    fn summarize_short_and_long_key_lists() {
        assert_eq!(summarize_keys(std::iter::empty()), "-");
        assert_eq!(summarize_keys(["a", "b"].into_iter()), "a, b");
        assert_eq!(
            summarize_keys(["a", "b", "c", "d", "e", "f"].into_iter()),
            "a, b, c, d, ... (+2)"
        );
    }

    #[test]
    fn default_pipeline_from_bundled_defaults() {
        let fixture = PackageFixture::new();
        let mut builder = fixture.state().builder(&fixture.target()).unwrap();
        builder.resolve_planning_pipelines(None, None, true).unwrap();
        assert_eq!(default_pipeline(builder.configs()).as_deref(), Some("ompl"));
        assert!(builder
            .configs()
            .pipeline_names()
            .contains(&"pilz_industrial_motion_planner".to_string()));
    }

    #[test]
    fn inspect_and_pipelines_succeed_on_a_complete_package() {
        let fixture = PackageFixture::new();
        inspect(&fixture.state(), &fixture.target(), true).unwrap();
        pipelines(&fixture.state(), &fixture.target(), false).unwrap();
    }
}
