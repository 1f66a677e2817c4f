// src/config/mod.rs

//! Configuration loading and validation.
//!
//! Responsibilities:
//! - Define the serde-backed data model (`model.rs`).
//! - Load a config document from disk, JSON or TOML (`loader.rs`).
//! - Validate the fields each entry point needs (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_evaluator_config, load_from_path, load_generator_config, parse_config};
pub use model::{
    EvaluatorConfig, GenerationParams, GeneratorConfig, NormalParams, RawConfigFile,
    WorkflowMetadata,
};
