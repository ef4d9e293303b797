//! URDF and SRDF resolution.

use std::path::Path;

use indexmap::IndexMap;
use moveit_configs_types::error::ConfigError;
use moveit_configs_types::parameter::{DeferredExpansion, MacroMappings, Substitution};
use serde_yaml_ng::Value;

use super::{MoveItConfigsBuilder, single_entry};

/// Xacro arguments, split by whether they can be expanded now.
#[derive(Debug, Clone, PartialEq)]
pub enum MacroArgs {
    /// Every key and value is a literal string: expand immediately.
    Resolved(IndexMap<String, String>),
    /// At least one launch substitution: hand the expansion to the runtime.
    Deferred(MacroMappings),
}

impl MacroArgs {
    pub fn classify(mappings: Option<MacroMappings>) -> Self {
        let Some(mappings) = mappings else {
            return MacroArgs::Resolved(IndexMap::new());
        };
        let all_literal = mappings
            .iter()
            .all(|(key, value)| key.as_literal().is_some() && value.as_literal().is_some());
        if !all_literal {
            return MacroArgs::Deferred(mappings);
        }
        MacroArgs::Resolved(
            mappings
                .into_iter()
                .filter_map(|pair| match pair {
                    (Substitution::Literal(key), Substitution::Literal(value)) => Some((key, value)),
                    _ => None,
                })
                .collect(),
        )
    }
}

impl MoveItConfigsBuilder {
    /// Load the robot description (URDF).
    ///
    /// Without mappings, the `xacro_args` recorded by the setup assistant are
    /// used. A missing URDF file is not an error: the warning says the
    /// description will be received from the `/<name>` topic and the category
    /// is left untouched.
    pub fn resolve_robot_model(
        &mut self,
        file_path: Option<&Path>,
        mappings: Option<MacroMappings>,
    ) -> Result<&mut Self, ConfigError> {
        let path = match file_path {
            Some(file_path) => self.package_path.join(file_path),
            None => self.urdf_path(),
        };

        match MacroArgs::classify(mappings) {
            MacroArgs::Resolved(args) => {
                let args = if args.is_empty() {
                    self.urdf_xacro_args.clone().unwrap_or_default()
                } else {
                    args
                };
                match self.expander.expand(&path, &args) {
                    Ok(urdf) => {
                        self.configs.robot_description =
                            single_entry(self.description_name.clone(), Value::String(urdf));
                    }
                    Err(err) if err.is_not_found() => {
                        tracing::warn!("{err}");
                        tracing::warn!(
                            "The robot description will be loaded from /{} topic",
                            self.description_name
                        );
                    }
                    Err(err) => return Err(err),
                }
            }
            MacroArgs::Deferred(mappings) => {
                tracing::debug!(path = %path.display(), "deferring robot description expansion");
                self.configs.robot_description = single_entry(
                    self.description_name.clone(),
                    DeferredExpansion {
                        file: path,
                        mappings,
                    },
                );
            }
        }
        Ok(self)
    }

    /// Load the semantic robot description (SRDF).
    ///
    /// Unlike the URDF, the SRDF has no runtime source, so a missing file is
    /// returned as [`ConfigError::FileNotFound`].
    pub fn resolve_semantic_model(
        &mut self,
        file_path: Option<&Path>,
        mappings: Option<MacroMappings>,
    ) -> Result<&mut Self, ConfigError> {
        let path = self
            .package_path
            .join(file_path.unwrap_or(self.srdf_file_path.as_path()));
        let key = format!("{}_semantic", self.description_name);

        self.configs.robot_description_semantic = match MacroArgs::classify(mappings) {
            MacroArgs::Resolved(args) => {
                single_entry(key, Value::String(self.expander.expand(&path, &args)?))
            }
            MacroArgs::Deferred(mappings) => single_entry(
                key,
                DeferredExpansion {
                    file: path,
                    mappings,
                },
            ),
        };
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;
    use moveit_configs_types::parameter::ParameterValue;

    fn urdf_of(builder: &MoveItConfigsBuilder) -> String {
        builder.configs().robot_description["robot_description"]
            .as_value()
            .and_then(Value::as_str)
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_classify_literal_mappings() {
        let args = MacroArgs::classify(Some(vec![("hand".into(), "true".into())]));
        let MacroArgs::Resolved(args) = args else {
            panic!("expected resolved args");
        };
        assert_eq!(args["hand"], "true");
        assert_eq!(MacroArgs::classify(None), MacroArgs::Resolved(IndexMap::new()));
    }

    #[test]
    fn test_classify_substitution_defers() {
        let mappings = vec![
            ("hand".into(), "true".into()),
            (
                Substitution::literal("use_sim"),
                Substitution::expression("$(var use_sim)"),
            ),
        ];
        assert_eq!(
            MacroArgs::classify(Some(mappings.clone())),
            MacroArgs::Deferred(mappings)
        );
    }

    #[test]
    fn test_robot_model_expands_with_setup_assistant_args() {
        let mut fixture = Fixture::new();
        let description = fixture.add_package("panda_description");
        crate::test_support::write_file(&description.join("urdf/panda.urdf.xacro"), "<robot/>");
        fixture.write(
            ".setup_assistant",
            r#"
moveit_setup_assistant_config:
  URDF:
    package: panda_description
    relative_path: urdf/panda.urdf.xacro
    xacro_args: "hand:=true"
"#,
        );
        let mut builder = fixture.builder();
        builder.resolve_robot_model(None, None).unwrap();
        assert!(urdf_of(&builder).contains("<!-- hand=true -->"));

        // Explicit mappings replace the recorded arguments.
        builder
            .resolve_robot_model(None, Some(vec![("hand".into(), "false".into())]))
            .unwrap();
        let urdf = urdf_of(&builder);
        assert!(urdf.contains("<!-- hand=false -->"));
        assert!(!urdf.contains("hand=true"));
    }

    #[test]
    fn test_robot_model_override_is_relative_to_package() {
        let fixture = Fixture::new();
        fixture.write("my_config/robot.urdf", "<robot name=\"custom\"/>");
        let mut builder = fixture.builder();
        builder
            .resolve_robot_model(Some(Path::new("my_config/robot.urdf")), None)
            .unwrap();
        assert_eq!(urdf_of(&builder), "<robot name=\"custom\"/>");
    }

    #[test]
    fn test_robot_model_missing_file_only_warns() {
        let fixture = Fixture::new();
        let mut builder = fixture.builder();
        builder.resolve_robot_model(None, None).unwrap();
        assert!(builder.configs().robot_description.is_empty());
    }

    #[test]
    fn test_robot_model_deferred_expansion() {
        let fixture = Fixture::new();
        let mut builder = fixture.builder();
        builder
            .resolve_robot_model(
                None,
                Some(vec![(
                    Substitution::literal("use_sim"),
                    Substitution::expression("$(var use_sim)"),
                )]),
            )
            .unwrap();
        let ParameterValue::Deferred(deferred) =
            &builder.configs().robot_description["robot_description"]
        else {
            panic!("expected a deferred expansion");
        };
        // The file does not need to exist until the runtime expands it.
        assert_eq!(deferred.file, fixture.package().join("config/panda.urdf"));
        assert_eq!(deferred.mappings.len(), 1);
    }

    #[test]
    fn test_semantic_model_missing_file_is_fatal() {
        let fixture = Fixture::new();
        let mut builder = fixture.builder();
        let err = builder.resolve_semantic_model(None, None).err().unwrap();
        assert!(err.is_not_found(), "got: {err}");
        assert!(err.to_string().contains("panda.srdf"));
    }

    #[test]
    fn test_semantic_model_uses_setup_assistant_path() {
        let fixture = Fixture::new();
        fixture.write("srdf/panda_arm.srdf", "<robot name=\"panda\"/>");
        fixture.write(
            ".setup_assistant",
            "moveit_setup_assistant_config:\n  SRDF:\n    relative_path: srdf/panda_arm.srdf\n",
        );
        let mut builder = fixture.builder();
        builder.resolve_semantic_model(None, None).unwrap();
        let semantic = &builder.configs().robot_description_semantic;
        assert_eq!(
            semantic["robot_description_semantic"].as_value(),
            Some(&Value::String("<robot name=\"panda\"/>".to_string()))
        );
    }

    #[test]
    fn test_semantic_model_literal_mappings_expand_now() {
        let fixture = Fixture::new();
        fixture.write("config/panda.srdf", "<robot name=\"panda\"/>");
        let mut builder = fixture.builder();
        builder
            .resolve_semantic_model(None, Some(vec![("prefix".into(), "left_".into())]))
            .unwrap();
        let semantic = builder.configs().robot_description_semantic["robot_description_semantic"]
            .as_value()
            .and_then(Value::as_str)
            .unwrap();
        assert!(semantic.contains("<!-- prefix=left_ -->"), "got: {semantic}");
    }

    #[test]
    fn test_semantic_model_deferred() {
        let fixture = Fixture::new();
        let mut builder = fixture.builder();
        builder
            .resolve_semantic_model(
                None,
                Some(vec![(
                    Substitution::literal("prefix"),
                    Substitution::expression("$(var prefix)"),
                )]),
            )
            .unwrap();
        assert!(builder.configs().robot_description_semantic["robot_description_semantic"]
            .as_deferred()
            .is_some());
    }
}
