// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::types::CandidatePolicy;

/// Configuration document as read from disk, before validation.
///
/// One document serves both entry points, so every field is optional here;
/// [`GeneratorConfig`] and [`EvaluatorConfig`] each check the subset they
/// need. Example (JSON):
///
/// ```json
/// {
///   "history_folder": "history",
///   "output_folder_path": "history",
///   "size_limit": 500,
///   "nb_actions": 200,
///   "action_size": { "mean": 50, "std": 20 },
///   "action_time": { "mean": 30, "std": 10 },
///   "workflow_size": { "mean": 20, "std": 5 },
///   "previous_actions": { "mean": 0.4, "std": 0.2 },
///   "nb_children": { "mean": 2, "std": 1 },
///   "nb_parent": { "mean": 2, "std": 1 },
///   "name": "synthetic",
///   "version": "1.0",
///   "main_class_name": "org.example.Main",
///   "action_folder": "/actions",
///   "nameNode": "hdfs://namenode:8020"
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    /// Folder the evaluator reads workflow documents from.
    #[serde(default)]
    pub history_folder: Option<PathBuf>,

    /// Folder the generator writes workflow documents to.
    #[serde(default)]
    pub output_folder_path: Option<PathBuf>,

    /// Cache capacity in MB.
    #[serde(default)]
    pub size_limit: Option<i64>,

    /// Total action budget of a generated history.
    #[serde(default)]
    pub nb_actions: Option<usize>,

    #[serde(default)]
    pub action_size: Option<NormalParams>,

    #[serde(default)]
    pub action_time: Option<NormalParams>,

    #[serde(default)]
    pub workflow_size: Option<NormalParams>,

    /// Fraction of a workflow drawn from earlier workflows.
    #[serde(default)]
    pub previous_actions: Option<NormalParams>,

    #[serde(default)]
    pub nb_children: Option<NormalParams>,

    #[serde(default)]
    pub nb_parent: Option<NormalParams>,

    /// Seed for the random source; a fresh one is drawn when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Which actions the evaluator may cache at each step.
    #[serde(default)]
    pub candidate_policy: Option<CandidatePolicy>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub main_class_name: Option<String>,

    #[serde(default)]
    pub action_folder: Option<String>,

    #[serde(default, rename = "nameNode")]
    pub name_node: Option<String>,
}

/// Mean / standard deviation of a normal distribution.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct NormalParams {
    pub mean: f64,
    pub std: f64,
}

impl NormalParams {
    pub fn new(mean: f64, std: f64) -> Self {
        Self { mean, std }
    }
}

/// Metadata copied verbatim into every persisted workflow document.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowMetadata {
    pub name: String,
    pub version: String,
    pub main_class_name: String,
    pub action_folder: String,
    pub name_node: String,
}

/// Distributions that shape one generated history.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub nb_actions: usize,
    pub action_size: NormalParams,
    pub action_time: NormalParams,
    pub workflow_size: NormalParams,
    pub previous_actions: NormalParams,
    pub nb_children: NormalParams,
    pub nb_parent: NormalParams,
}

/// Validated configuration for the generator entry point.
///
/// Only constructible through `TryFrom<&RawConfigFile>` (see
/// `config::validate`) or [`GeneratorConfig::new_unchecked`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub output_folder: PathBuf,
    pub params: GenerationParams,
    pub metadata: WorkflowMetadata,
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    pub fn new_unchecked(
        output_folder: PathBuf,
        params: GenerationParams,
        metadata: WorkflowMetadata,
        seed: Option<u64>,
    ) -> Self {
        Self {
            output_folder,
            params,
            metadata,
            seed,
        }
    }
}

/// Validated configuration for the evaluator entry point.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatorConfig {
    pub history_folder: PathBuf,
    pub size_limit: i64,
    pub candidate_policy: CandidatePolicy,
}

impl EvaluatorConfig {
    pub fn new_unchecked(
        history_folder: PathBuf,
        size_limit: i64,
        candidate_policy: CandidatePolicy,
    ) -> Self {
        Self {
            history_folder,
            size_limit,
            candidate_policy,
        }
    }
}
