// src/generator/builder.rs

//! Construction of a single workflow on top of the history so far.

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::trace;

use crate::config::model::NormalParams;
use crate::dag::WorkflowGraph;
use crate::errors::Result;
use crate::generator::sampling::NormalSampler;
use crate::types::ActionId;

/// Fan-out / fan-in distributions used when wiring a workflow.
#[derive(Debug, Clone, Copy)]
pub struct DegreeSamplers {
    pub children: NormalSampler,
    pub parents: NormalSampler,
}

impl DegreeSamplers {
    pub fn new(nb_children: NormalParams, nb_parent: NormalParams) -> Result<Self> {
        Ok(Self {
            children: NormalSampler::new(nb_children)?,
            parents: NormalSampler::new(nb_parent)?,
        })
    }
}

/// Shape of the workflow to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowRequest {
    /// Target number of actions (reused + new).
    pub workflow_size: usize,
    /// How many actions of the history to sample as reuse candidates.
    pub nb_previous: usize,
    /// Global action budget; new ids never reach it.
    pub total_actions: usize,
}

/// A freshly built workflow and where its actions came from.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltWorkflow {
    pub graph: WorkflowGraph,
    /// Actions taken over from earlier workflows, in inclusion order.
    pub reused: Vec<ActionId>,
    /// Actions introduced by this workflow (a contiguous id range).
    pub introduced: Vec<ActionId>,
}

/// Builds one workflow DAG from the union of all previous workflows.
///
/// The union is only read here; merging the result back is the caller's
/// job (see [`crate::generator::history::HistoryGenerator`]).
#[derive(Debug)]
pub struct WorkflowGraphBuilder<'a> {
    union: &'a WorkflowGraph,
    degrees: &'a DegreeSamplers,
}

impl<'a> WorkflowGraphBuilder<'a> {
    pub fn new(union: &'a WorkflowGraph, degrees: &'a DegreeSamplers) -> Self {
        Self { union, degrees }
    }

    pub fn build<R: Rng + ?Sized>(
        &self,
        request: WorkflowRequest,
        rng: &mut R,
    ) -> Result<BuiltWorkflow> {
        let reused = self.select_previous_actions(request.nb_previous, rng)?;

        // Parent counts of reused actions are fixed by the history; only
        // their fan-out towards new actions is sampled.
        let reused_quota: Vec<usize> = reused
            .iter()
            .map(|_| self.degrees.children.sample_count(rng))
            .collect();

        let first_new = self.union.len();
        let end_new = (first_new + request.workflow_size.saturating_sub(request.nb_previous))
            .min(request.total_actions)
            .max(first_new);
        let introduced: Vec<ActionId> = (first_new..end_new).collect();

        let mut children_quota = Vec::with_capacity(introduced.len());
        let mut parent_slots = Vec::with_capacity(introduced.len());
        for _ in &introduced {
            children_quota.push(self.degrees.children.sample_count(rng));
            parent_slots.push(self.degrees.parents.sample_count(rng));
        }

        let mut graph = self.union.induced_subgraph(&reused);

        // previous -> new
        for (&action, &quota) in reused.iter().zip(&reused_quota) {
            let mut attached = 0;
            for idx in shuffled_indices(introduced.len(), rng) {
                if attached >= quota {
                    break;
                }
                if parent_slots[idx] > 0 {
                    graph.add_edge(action, introduced[idx])?;
                    parent_slots[idx] -= 1;
                    attached += 1;
                }
            }
        }

        // new -> new, never towards self or an ancestor
        for (pos, &action) in introduced.iter().enumerate() {
            graph.add_node(action);
            // Edges added below leave from `action`, so its ancestor set
            // stays fixed for the whole loop.
            let ancestors = graph.ancestors(action);
            let mut attached = 0;
            for idx in shuffled_indices(introduced.len(), rng) {
                if attached >= children_quota[pos] {
                    break;
                }
                let target = introduced[idx];
                if parent_slots[idx] > 0 && target != action && !ancestors.contains(&target) {
                    graph.add_edge(action, target)?;
                    parent_slots[idx] -= 1;
                    attached += 1;
                }
            }
            if attached < children_quota[pos] {
                trace!(
                    action,
                    wanted = children_quota[pos],
                    attached,
                    "not enough eligible children"
                );
            }
        }

        Ok(BuiltWorkflow {
            graph,
            reused,
            introduced,
        })
    }

    /// Sample `nb_previous` positions of the union's topological order and
    /// reduce them to a connected set of actions.
    fn select_previous_actions<R: Rng + ?Sized>(
        &self,
        nb_previous: usize,
        rng: &mut R,
    ) -> Result<Vec<ActionId>> {
        let order = self.union.topological_order()?;
        let amount = nb_previous.min(order.len());
        if amount == 0 {
            return Ok(Vec::new());
        }

        let candidates: Vec<ActionId> = rand::seq::index::sample(rng, order.len(), amount)
            .into_iter()
            .map(|i| order[i])
            .collect();
        Ok(connect_candidates(self.union, candidates))
    }
}

/// Reduce reuse candidates to the actions connecting them.
///
/// Each round takes the first remaining candidate as source and looks for a
/// shortest path to every other candidate. Reachable targets contribute their
/// whole path (source included) and are done; unreachable ones carry over to
/// the next round. The source is dropped after its round. A single leftover
/// candidate is included as is.
///
/// The result is deduplicated and keeps first-inclusion order.
pub fn connect_candidates(union: &WorkflowGraph, mut candidates: Vec<ActionId>) -> Vec<ActionId> {
    let mut included = Vec::new();
    let mut seen = BTreeSet::new();

    while candidates.len() > 1 {
        let source = candidates[0];
        let mut unresolved = Vec::new();
        for &target in &candidates[1..] {
            match union.shortest_path(source, target) {
                Some(path) if path.len() > 1 => {
                    for id in path {
                        if seen.insert(id) {
                            included.push(id);
                        }
                    }
                }
                _ => unresolved.push(target),
            }
        }
        candidates = unresolved;
    }

    if let Some(&last) = candidates.first() {
        if seen.insert(last) {
            included.push(last);
        }
    }
    included
}

fn shuffled_indices<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    indices.shuffle(rng);
    indices
}
