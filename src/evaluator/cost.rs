// src/evaluator/cost.rs

use std::collections::{BTreeSet, VecDeque};

use crate::catalog::ActionCatalog;
use crate::dag::WorkflowGraph;
use crate::errors::Result;
use crate::types::ActionId;

/// Actions whose outputs are materialized during one step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheSet(BTreeSet<ActionId>);

impl CacheSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn contains(&self, id: ActionId) -> bool {
        self.0.contains(&id)
    }

    pub fn insert(&mut self, id: ActionId) -> bool {
        self.0.insert(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.0.iter().copied()
    }

    /// Sum of the real sizes of the cached actions.
    pub fn total_size_mb(&self, catalog: &ActionCatalog) -> Result<f64> {
        let mut total = 0.0;
        for id in self.iter() {
            total += catalog.action(id)?.size_mb;
        }
        Ok(total)
    }
}

impl FromIterator<ActionId> for CacheSet {
    fn from_iter<I: IntoIterator<Item = ActionId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Time needed to produce every sink of `workflow` when the actions in
/// `cache` are already materialized.
///
/// Breadth-first from the sinks towards the sources. A cached action costs
/// nothing and shields its ancestors; any other action adds its
/// recomputation cost and queues its parents. Actions are marked visited
/// when queued, so each contributes at most once. An empty workflow costs
/// zero.
pub fn workflow_computation_time(
    workflow: &WorkflowGraph,
    catalog: &ActionCatalog,
    cache: &CacheSet,
) -> Result<f64> {
    let sinks = workflow.sinks();
    let mut visited: BTreeSet<ActionId> = sinks.iter().copied().collect();
    let mut queue: VecDeque<ActionId> = sinks.into_iter().collect();
    let mut total = 0.0;

    while let Some(id) = queue.pop_front() {
        if cache.contains(id) {
            continue;
        }
        total += catalog.action(id)?.recompute_cost;
        for &parent in workflow.parents_of(id) {
            if visited.insert(parent) {
                queue.push_back(parent);
            }
        }
    }

    Ok(total)
}
