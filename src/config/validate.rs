// src/config/validate.rs

use crate::config::model::{
    EvaluatorConfig, GenerationParams, GeneratorConfig, NormalParams, RawConfigFile,
    WorkflowMetadata,
};
use crate::errors::{CacheboundError, Result};

impl TryFrom<&RawConfigFile> for GeneratorConfig {
    type Error = CacheboundError;

    fn try_from(raw: &RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let output_folder = required(raw.output_folder_path.clone(), "output_folder_path")?;

        let nb_actions = required(raw.nb_actions, "nb_actions")?;
        if nb_actions == 0 {
            return Err(CacheboundError::ConfigError(
                "nb_actions must be >= 1 (got 0)".to_string(),
            ));
        }

        let params = GenerationParams {
            nb_actions,
            action_size: normal(raw.action_size, "action_size")?,
            action_time: normal(raw.action_time, "action_time")?,
            workflow_size: normal(raw.workflow_size, "workflow_size")?,
            previous_actions: normal(raw.previous_actions, "previous_actions")?,
            nb_children: normal(raw.nb_children, "nb_children")?,
            nb_parent: normal(raw.nb_parent, "nb_parent")?,
        };

        let metadata = WorkflowMetadata {
            name: required(raw.name.clone(), "name")?,
            version: required(raw.version.clone(), "version")?,
            main_class_name: required(raw.main_class_name.clone(), "main_class_name")?,
            action_folder: required(raw.action_folder.clone(), "action_folder")?,
            name_node: required(raw.name_node.clone(), "nameNode")?,
        };

        Ok(GeneratorConfig::new_unchecked(
            output_folder,
            params,
            metadata,
            raw.seed,
        ))
    }
}

impl TryFrom<&RawConfigFile> for EvaluatorConfig {
    type Error = CacheboundError;

    fn try_from(raw: &RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let history_folder = required(raw.history_folder.clone(), "history_folder")?;
        let size_limit = required(raw.size_limit, "size_limit")?;
        if size_limit < 0 {
            return Err(CacheboundError::ConfigError(format!(
                "size_limit must be >= 0 (got {size_limit})"
            )));
        }

        Ok(EvaluatorConfig::new_unchecked(
            history_folder,
            size_limit,
            raw.candidate_policy.unwrap_or_default(),
        ))
    }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| {
        CacheboundError::ConfigError(format!("missing required field `{field}`"))
    })
}

fn normal(value: Option<NormalParams>, field: &str) -> Result<NormalParams> {
    let params = required(value, field)?;
    if !params.mean.is_finite() {
        return Err(CacheboundError::ConfigError(format!(
            "`{field}.mean` must be a finite number (got {})",
            params.mean
        )));
    }
    if !params.std.is_finite() || params.std < 0.0 {
        return Err(CacheboundError::ConfigError(format!(
            "`{field}.std` must be finite and >= 0 (got {})",
            params.std
        )));
    }
    Ok(params)
}
