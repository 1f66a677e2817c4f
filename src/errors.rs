// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheboundError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Graph construction error: {0}")]
    GraphConstruction(String),

    #[error("Invalid cache capacity: {0} (must be >= 0)")]
    Capacity(i64),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, CacheboundError>;
