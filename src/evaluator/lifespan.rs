// src/evaluator/lifespan.rs

//! When is each action referenced for the last time, and which actions are
//! worth keeping around at a given step.

use std::collections::{BTreeMap, BTreeSet};

use crate::history::WorkflowHistory;
use crate::types::{Action, ActionId, CandidatePolicy};

/// Last step (0-based, history order) referencing each action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LifespanMap(BTreeMap<ActionId, usize>);

impl LifespanMap {
    /// Built by scanning the steps from the last one backwards: the first
    /// sighting of an action is its last reference.
    pub fn from_action_sets(action_sets: &[BTreeSet<ActionId>]) -> Self {
        let mut last = BTreeMap::new();
        for (step, actions) in action_sets.iter().enumerate().rev() {
            for &id in actions {
                last.entry(id).or_insert(step);
            }
        }
        Self(last)
    }

    pub fn get(&self, id: ActionId) -> Option<usize> {
        self.0.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ActionId, usize)> + '_ {
        self.0.iter().map(|(id, step)| (*id, *step))
    }
}

/// Actions still relevant at step `t`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveSet {
    /// Seen before `t`, last referenced at `t` or later.
    pub carryover: BTreeSet<ActionId>,
    /// First seen at `t`, referenced again after `t`.
    pub introduced: BTreeSet<ActionId>,
}

impl ActiveSet {
    /// The cache candidates under `policy`.
    pub fn candidates(&self, policy: CandidatePolicy) -> BTreeSet<ActionId> {
        match policy {
            CandidatePolicy::Carryover => self.carryover.clone(),
            CandidatePolicy::Union => self.carryover.union(&self.introduced).copied().collect(),
        }
    }
}

/// Lifespans and per-step active sets of a whole history.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LifespanAnalysis {
    action_sets: Vec<BTreeSet<ActionId>>,
    lifespan: LifespanMap,
    active: Vec<ActiveSet>,
}

impl LifespanAnalysis {
    pub fn from_history(history: &WorkflowHistory) -> Self {
        Self::analyze(history.action_sets())
    }

    /// Analyze per-step action sets `P_t`.
    pub fn analyze(action_sets: Vec<BTreeSet<ActionId>>) -> Self {
        let lifespan = LifespanMap::from_action_sets(&action_sets);

        let mut active = Vec::with_capacity(action_sets.len());
        let mut seen: BTreeSet<ActionId> = BTreeSet::new();
        for (step, actions) in action_sets.iter().enumerate() {
            let lives_until = |id: &ActionId| lifespan.get(*id).unwrap_or(0);

            let carryover = seen
                .iter()
                .copied()
                .filter(|id| lives_until(id) >= step)
                .collect();
            let introduced = actions
                .iter()
                .copied()
                .filter(|id| !seen.contains(id) && lives_until(id) > step)
                .collect();

            active.push(ActiveSet {
                carryover,
                introduced,
            });
            seen.extend(actions.iter().copied());
        }

        Self {
            action_sets,
            lifespan,
            active,
        }
    }

    /// Number of steps analyzed.
    pub fn steps(&self) -> usize {
        self.action_sets.len()
    }

    pub fn lifespan(&self) -> &LifespanMap {
        &self.lifespan
    }

    pub fn active_set(&self, step: usize) -> Option<&ActiveSet> {
        self.active.get(step)
    }

    /// Total recomputation time saved by keeping `action` materialized from
    /// `step` to the end of the history: its cost once for every step at or
    /// after `step` that references it.
    pub fn computation_time_left(&self, action: &Action, step: usize) -> f64 {
        self.action_sets
            .iter()
            .skip(step)
            .filter(|actions| actions.contains(&action.id))
            .map(|_| action.recompute_cost)
            .sum()
    }
}
