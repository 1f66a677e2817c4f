// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::{EvaluatorConfig, GeneratorConfig, RawConfigFile};
use crate::errors::Result;

/// Load a configuration document from a given path.
///
/// Files ending in `.toml` are read as TOML; anything else is read as JSON.
/// This only performs deserialization; it does **not** check that the fields
/// an entry point needs are present. Use [`load_generator_config`] or
/// [`load_evaluator_config`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    parse_config(path, &contents)
}

/// Parse configuration text, choosing the format from `path`'s extension.
pub fn parse_config(path: &Path, contents: &str) -> Result<RawConfigFile> {
    let is_toml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

    let config: RawConfigFile = if is_toml {
        toml::from_str(contents)?
    } else {
        serde_json::from_str(contents)?
    };
    Ok(config)
}

/// Load and validate the configuration used by the generator.
pub fn load_generator_config(path: impl AsRef<Path>) -> Result<GeneratorConfig> {
    let raw = load_from_path(path)?;
    GeneratorConfig::try_from(&raw)
}

/// Load and validate the configuration used by the evaluator.
pub fn load_evaluator_config(path: impl AsRef<Path>) -> Result<EvaluatorConfig> {
    let raw = load_from_path(path)?;
    EvaluatorConfig::try_from(&raw)
}
