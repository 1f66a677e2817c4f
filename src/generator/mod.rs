// src/generator/mod.rs

//! Synthetic workflow histories.
//!
//! - [`sampling`] wraps the normal distributions the configuration describes.
//! - [`builder`] builds one workflow on top of the history so far.
//! - [`history`] chains workflows until the action budget is used up.

pub mod builder;
pub mod history;
pub mod sampling;

pub use builder::{BuiltWorkflow, DegreeSamplers, WorkflowGraphBuilder, WorkflowRequest};
pub use history::{GeneratedHistory, HistoryGenerator, HistoryStep, generate_history};
pub use sampling::NormalSampler;
