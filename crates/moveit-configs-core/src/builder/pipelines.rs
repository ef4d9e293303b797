//! Planning pipeline discovery and loading.

use std::path::Path;
use std::sync::LazyLock;

use moveit_configs_types::error::ConfigError;
use moveit_configs_types::parameter::ParameterMap;
use regex::Regex;
use serde_yaml_ng::{Mapping, Value};

use super::MoveItConfigsBuilder;
use crate::scan::captured_names;

static PLANNING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*)_planning\.yaml$").expect("planning pattern is a valid regex")
});

const OMPL_PIPELINE: &str = "ompl";
const OMPL_DEFAULTS_FILE: &str = "ompl_defaults.yaml";

impl MoveItConfigsBuilder {
    /// Load planning pipeline parameters.
    ///
    /// When `pipelines` is `None` they are discovered from
    /// `config/*_planning.yaml`; with `load_all`, pipelines that only exist in
    /// the bundled defaults directory are appended after the package's own.
    /// The default pipeline is `ompl` if present, else the first one, and must
    /// name a loaded pipeline. Each pipeline reads the package file first and
    /// falls back to the bundled one. An OMPL configuration without
    /// `planner_configs` is completed from `ompl_defaults.yaml`.
    pub fn resolve_planning_pipelines(
        &mut self,
        default_pipeline: Option<&str>,
        pipelines: Option<Vec<String>>,
        load_all: bool,
    ) -> Result<&mut Self, ConfigError> {
        let config_dir = self.config_dir();

        let pipelines = match pipelines {
            Some(pipelines) => pipelines,
            None => {
                let mut discovered = captured_names(&config_dir, &PLANNING_PATTERN)?;
                if load_all {
                    for pipeline in captured_names(&self.defaults_dir()?, &PLANNING_PATTERN)? {
                        if !discovered.contains(&pipeline) {
                            discovered.push(pipeline);
                        }
                    }
                }
                discovered
            }
        };

        let default_pipeline = match default_pipeline.filter(|name| !name.is_empty()) {
            Some(name) => name.to_string(),
            None if pipelines.iter().any(|p| p == OMPL_PIPELINE) => OMPL_PIPELINE.to_string(),
            None => pipelines
                .first()
                .cloned()
                .ok_or_else(|| ConfigError::NoPlanningPipelines {
                    config_dir: config_dir.clone(),
                })?,
        };

        if !pipelines.contains(&default_pipeline) {
            return Err(ConfigError::UnknownDefaultPipeline {
                default: default_pipeline,
                pipelines,
            });
        }

        let mut loaded = ParameterMap::new();
        loaded.insert(
            "planning_pipelines".to_string(),
            Value::Sequence(pipelines.iter().cloned().map(Value::String).collect()).into(),
        );
        loaded.insert(
            "default_planning_pipeline".to_string(),
            default_pipeline.into(),
        );

        for pipeline in &pipelines {
            let file_name = format!("{pipeline}_planning.yaml");
            let mut parameter_file = config_dir.join(&file_name);
            if !parameter_file.exists() {
                parameter_file = self.defaults_dir()?.join(&file_name);
            }
            tracing::debug!(pipeline = %pipeline, path = %parameter_file.display(), "loading planning pipeline");

            let mut params = self.yaml.load_yaml(&parameter_file)?;
            if pipeline == OMPL_PIPELINE {
                params = self.with_ompl_defaults(params, &parameter_file)?;
            }
            loaded.insert(pipeline.clone(), params.into());
        }

        self.configs.planning_pipelines = loaded;
        Ok(self)
    }

    fn with_ompl_defaults(&self, params: Value, path: &Path) -> Result<Value, ConfigError> {
        let mut params = match params {
            Value::Null => Mapping::new(),
            Value::Mapping(mapping) => mapping,
            _ => {
                return Err(ConfigError::InvalidShape {
                    path: path.to_path_buf(),
                    expected: "a mapping of OMPL parameters",
                });
            }
        };
        if params.contains_key("planner_configs") {
            return Ok(Value::Mapping(params));
        }

        let defaults_file = self.defaults_dir()?.join(OMPL_DEFAULTS_FILE);
        match self.yaml.load_yaml(&defaults_file)? {
            Value::Mapping(defaults) => {
                for (key, value) in defaults {
                    params.insert(key, value);
                }
            }
            Value::Null => {}
            _ => {
                return Err(ConfigError::InvalidShape {
                    path: defaults_file,
                    expected: "a mapping of OMPL parameters",
                });
            }
        }
        Ok(Value::Mapping(params))
    }
}
