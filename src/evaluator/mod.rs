// src/evaluator/mod.rs

//! Ideal computation time of a workflow history under an oracle cache.
//!
//! - [`lifespan`]: last references and per-step cache candidates.
//! - [`knapsack`]: capacity-bounded selection of what to keep.
//! - [`cost`]: recomputation time of one workflow given a cache set.
//! - [`simulation`]: the step loop tying the three together.

pub mod cost;
pub mod knapsack;
pub mod lifespan;
pub mod simulation;

pub use cost::{CacheSet, workflow_computation_time};
pub use knapsack::{KnapsackItem, KnapsackSolution, knapsack};
pub use lifespan::{ActiveSet, LifespanAnalysis, LifespanMap};
pub use simulation::{EvaluationReport, SimulationOrchestrator, StepReport, ideal_computation_time};
