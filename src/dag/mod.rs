// src/dag/mod.rs

//! Workflow DAG representation.
//!
//! - [`graph`] holds the adjacency structure and its validated mutations.
//! - [`algo`] adds topological ordering, shortest paths and reachability.

pub mod algo;
pub mod graph;

pub use graph::WorkflowGraph;
