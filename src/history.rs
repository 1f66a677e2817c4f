// src/history.rs

use std::collections::BTreeSet;

use crate::dag::WorkflowGraph;
use crate::types::ActionId;

/// Ordered sequence of workflows sharing one action id space.
///
/// Workflows are immutable once pushed; index `t` is the workflow's time
/// step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowHistory {
    workflows: Vec<WorkflowGraph>,
}

impl WorkflowHistory {
    pub fn new() -> Self {
        Self {
            workflows: Vec::new(),
        }
    }

    pub fn push(&mut self, workflow: WorkflowGraph) {
        self.workflows.push(workflow);
    }

    pub fn len(&self) -> usize {
        self.workflows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workflows.is_empty()
    }

    pub fn get(&self, step: usize) -> Option<&WorkflowGraph> {
        self.workflows.get(step)
    }

    pub fn workflows(&self) -> &[WorkflowGraph] {
        &self.workflows
    }

    pub fn iter(&self) -> impl Iterator<Item = &WorkflowGraph> {
        self.workflows.iter()
    }

    /// The actions referenced at each step (`P_t`).
    pub fn action_sets(&self) -> Vec<BTreeSet<ActionId>> {
        self.workflows
            .iter()
            .map(|w| w.nodes().collect())
            .collect()
    }
}

impl FromIterator<WorkflowGraph> for WorkflowHistory {
    fn from_iter<I: IntoIterator<Item = WorkflowGraph>>(iter: I) -> Self {
        Self {
            workflows: iter.into_iter().collect(),
        }
    }
}
