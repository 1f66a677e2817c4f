// src/evaluator/simulation.rs

use tracing::{debug, info};

use crate::catalog::ActionCatalog;
use crate::errors::Result;
use crate::evaluator::cost::{CacheSet, workflow_computation_time};
use crate::evaluator::knapsack::{KnapsackItem, knapsack};
use crate::evaluator::lifespan::LifespanAnalysis;
use crate::history::WorkflowHistory;
use crate::types::CandidatePolicy;

/// Outcome of one time step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub step: usize,
    /// Number of actions the knapsack chose from.
    pub candidates: usize,
    pub cache: CacheSet,
    pub cached_size_mb: f64,
    /// Total benefit of the chosen cache set.
    pub cached_value: f64,
    /// Recomputation time with the chosen cache set.
    pub cost: f64,
    /// Recomputation time with nothing cached.
    pub baseline_cost: f64,
}

/// Outcome of a whole evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationReport {
    pub steps: Vec<StepReport>,
    /// The ideal computation time.
    pub total_cost: f64,
    pub baseline_total_cost: f64,
}

impl EvaluationReport {
    /// Recomputation time the oracle cache saves over no cache at all.
    pub fn savings(&self) -> f64 {
        self.baseline_total_cost - self.total_cost
    }
}

/// Drives the per-step loop: candidates, cache selection, step cost.
///
/// Each step's knapsack is solved on its own; nothing carries over from one
/// step's cache set to the next.
#[derive(Debug)]
pub struct SimulationOrchestrator<'a> {
    catalog: &'a ActionCatalog,
    history: &'a WorkflowHistory,
    analysis: LifespanAnalysis,
    size_limit: i64,
    policy: CandidatePolicy,
}

impl<'a> SimulationOrchestrator<'a> {
    pub fn new(catalog: &'a ActionCatalog, history: &'a WorkflowHistory, size_limit: i64) -> Self {
        Self {
            catalog,
            history,
            analysis: LifespanAnalysis::from_history(history),
            size_limit,
            policy: CandidatePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: CandidatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn analysis(&self) -> &LifespanAnalysis {
        &self.analysis
    }

    /// Choose the cache set for `step`.
    pub fn select_cache(&self, step: usize) -> Result<CacheSet> {
        let candidates = self
            .analysis
            .active_set(step)
            .map(|active| active.candidates(self.policy))
            .unwrap_or_default();

        let mut items = Vec::with_capacity(candidates.len());
        for id in candidates {
            let action = self.catalog.action(id)?;
            let benefit = self.analysis.computation_time_left(action, step);
            items.push(KnapsackItem::for_action(action, benefit));
        }

        let solution = knapsack(&items, self.size_limit)?;
        Ok(solution.items.iter().map(|item| item.action).collect())
    }

    /// Evaluate a single step.
    pub fn evaluate_step(&self, step: usize) -> Result<StepReport> {
        let candidates = self
            .analysis
            .active_set(step)
            .map(|active| active.candidates(self.policy).len())
            .unwrap_or(0);

        let cache = self.select_cache(step)?;
        let empty = CacheSet::new();

        let (cost, baseline_cost) = match self.history.get(step) {
            Some(workflow) => (
                workflow_computation_time(workflow, self.catalog, &cache)?,
                workflow_computation_time(workflow, self.catalog, &empty)?,
            ),
            None => (0.0, 0.0),
        };

        let mut cached_value = 0.0;
        for id in cache.iter() {
            cached_value += self
                .analysis
                .computation_time_left(self.catalog.action(id)?, step);
        }

        let report = StepReport {
            step,
            candidates,
            cached_size_mb: cache.total_size_mb(self.catalog)?,
            cached_value,
            cache,
            cost,
            baseline_cost,
        };
        debug!(
            step,
            candidates = report.candidates,
            cached = report.cache.len(),
            cached_size_mb = report.cached_size_mb,
            cost = report.cost,
            baseline = report.baseline_cost,
            "evaluated step"
        );
        Ok(report)
    }

    /// Evaluate every step in history order.
    pub fn run(&self) -> Result<EvaluationReport> {
        let mut report = EvaluationReport::default();
        for step in 0..self.history.len() {
            let step_report = self.evaluate_step(step)?;
            report.total_cost += step_report.cost;
            report.baseline_total_cost += step_report.baseline_cost;
            report.steps.push(step_report);
        }

        info!(
            steps = report.steps.len(),
            size_limit = self.size_limit,
            policy = ?self.policy,
            total_cost = report.total_cost,
            baseline_total_cost = report.baseline_total_cost,
            "evaluation finished"
        );
        Ok(report)
    }
}

/// Ideal computation time of `history` under a `size_limit` MB oracle cache,
/// with the default candidate policy.
pub fn ideal_computation_time(
    catalog: &ActionCatalog,
    history: &WorkflowHistory,
    size_limit: i64,
) -> Result<f64> {
    Ok(SimulationOrchestrator::new(catalog, history, size_limit)
        .run()?
        .total_cost)
}
