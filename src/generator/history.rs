// src/generator/history.rs

use rand::Rng;
use tracing::{debug, info};

use crate::catalog::ActionCatalog;
use crate::config::model::GenerationParams;
use crate::dag::WorkflowGraph;
use crate::errors::Result;
use crate::generator::builder::{DegreeSamplers, WorkflowGraphBuilder, WorkflowRequest};
use crate::generator::sampling::NormalSampler;
use crate::history::WorkflowHistory;

/// Bookkeeping for one generated workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryStep {
    pub index: usize,
    /// Size requested from the builder (after clamping and budget capping).
    pub workflow_size: usize,
    /// Reuse candidates requested from the builder.
    pub nb_previous: usize,
    /// Previous actions actually included.
    pub reused: usize,
    /// Actions introduced by this workflow.
    pub introduced: usize,
}

/// Everything a generation run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedHistory {
    pub catalog: ActionCatalog,
    pub history: WorkflowHistory,
    pub steps: Vec<HistoryStep>,
    /// Union of every workflow in `history`.
    pub union: WorkflowGraph,
}

/// Produces workflows one after the other until every action of the budget
/// has been introduced exactly once.
///
/// Owns the cumulative union graph: it is only ever grown, by merging each
/// new workflow into it.
#[derive(Debug)]
pub struct HistoryGenerator {
    total_actions: usize,
    workflow_size: NormalSampler,
    previous_actions: NormalSampler,
    degrees: DegreeSamplers,
    union: WorkflowGraph,
    used_actions: usize,
    history: WorkflowHistory,
    steps: Vec<HistoryStep>,
}

impl HistoryGenerator {
    pub fn new(params: &GenerationParams) -> Result<Self> {
        Ok(Self {
            total_actions: params.nb_actions,
            workflow_size: NormalSampler::new(params.workflow_size)?,
            previous_actions: NormalSampler::new(params.previous_actions)?,
            degrees: DegreeSamplers::new(params.nb_children, params.nb_parent)?,
            union: WorkflowGraph::new(),
            used_actions: 0,
            history: WorkflowHistory::new(),
            steps: Vec::new(),
        })
    }

    /// `true` once the whole action budget has been introduced.
    pub fn is_exhausted(&self) -> bool {
        self.used_actions >= self.total_actions
    }

    pub fn used_actions(&self) -> usize {
        self.used_actions
    }

    pub fn union(&self) -> &WorkflowGraph {
        &self.union
    }

    pub fn history(&self) -> &WorkflowHistory {
        &self.history
    }

    /// Generate the next workflow. Returns `None` when the budget is already
    /// exhausted.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Option<HistoryStep>> {
        if self.is_exhausted() {
            return Ok(None);
        }
        let remaining = self.total_actions - self.used_actions;

        let workflow_size = self.workflow_size.sample(rng).max(1.0) as usize;
        let fraction = self.previous_actions.sample_abs(rng).min(1.0);
        // At least one new action per workflow, so the loop always terminates.
        let nb_previous = ((fraction * workflow_size as f64) as usize).min(workflow_size - 1);
        let workflow_size = workflow_size.min(remaining + nb_previous);

        let request = WorkflowRequest {
            workflow_size,
            nb_previous,
            total_actions: self.total_actions,
        };
        let built = WorkflowGraphBuilder::new(&self.union, &self.degrees).build(request, rng)?;

        self.union.merge(&built.graph)?;
        self.used_actions += built.introduced.len();

        let step = HistoryStep {
            index: self.history.len(),
            workflow_size,
            nb_previous,
            reused: built.reused.len(),
            introduced: built.introduced.len(),
        };
        info!(
            workflow = step.index,
            size = built.graph.len(),
            edges = built.graph.edge_count(),
            reused = step.reused,
            introduced = step.introduced,
            used = self.used_actions,
            budget = self.total_actions,
            "generated workflow"
        );

        self.history.push(built.graph);
        self.steps.push(step);
        Ok(Some(step))
    }

    /// Generate workflows until the budget is exhausted.
    pub fn run<R: Rng + ?Sized>(
        mut self,
        rng: &mut R,
    ) -> Result<(WorkflowHistory, Vec<HistoryStep>, WorkflowGraph)> {
        while self.step(rng)?.is_some() {}
        debug!(
            workflows = self.history.len(),
            union_edges = self.union.edge_count(),
            "history generation finished"
        );
        Ok((self.history, self.steps, self.union))
    }
}

/// Draw an action catalog, then a history over it, from one random source.
pub fn generate_history<R: Rng + ?Sized>(
    params: &GenerationParams,
    rng: &mut R,
) -> Result<GeneratedHistory> {
    let catalog = ActionCatalog::generate(params, rng)?;
    let (history, steps, union) = HistoryGenerator::new(params)?.run(rng)?;
    Ok(GeneratedHistory {
        catalog,
        history,
        steps,
        union,
    })
}
