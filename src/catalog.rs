// src/catalog.rs

//! The universe of actions a history draws from.

use std::collections::{BTreeMap, HashSet};

use rand::Rng;
use tracing::debug;

use crate::config::model::GenerationParams;
use crate::errors::{CacheboundError, Result};
use crate::generator::sampling::NormalSampler;
use crate::types::{Action, ActionId};

const LABEL_LEN: usize = 10;
const LABEL_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Static metadata for every action, keyed by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionCatalog {
    actions: BTreeMap<ActionId, Action>,
}

impl ActionCatalog {
    pub fn new() -> Self {
        Self {
            actions: BTreeMap::new(),
        }
    }

    /// Draw `params.nb_actions` actions. Action `i` gets id `i`, a size and a
    /// recomputation time from `|N(action_size)|` and `|N(action_time)|`, and
    /// a unique random label.
    pub fn generate<R: Rng + ?Sized>(params: &GenerationParams, rng: &mut R) -> Result<Self> {
        let size = NormalSampler::new(params.action_size)?;
        let time = NormalSampler::new(params.action_time)?;

        let mut labels = HashSet::with_capacity(params.nb_actions);
        let mut actions = BTreeMap::new();
        for id in 0..params.nb_actions {
            let size_mb = size.sample_abs(rng);
            let recompute_cost = time.sample_abs(rng);
            let name = loop {
                let candidate = random_label(rng);
                if labels.insert(candidate.clone()) {
                    break candidate;
                }
            };
            actions.insert(id, Action::new(id, size_mb, recompute_cost, name));
        }

        debug!(nb_actions = actions.len(), "generated action catalog");
        Ok(Self { actions })
    }

    /// Assemble a catalog from known actions (e.g. read back from disk).
    pub fn from_actions<I: IntoIterator<Item = Action>>(actions: I) -> Result<Self> {
        let mut catalog = Self::new();
        for action in actions {
            catalog.insert(action)?;
        }
        Ok(catalog)
    }

    /// Register an action. Registering the same action twice is a no-op;
    /// registering a different action under an existing id is an error.
    pub fn insert(&mut self, action: Action) -> Result<()> {
        match self.actions.get(&action.id) {
            Some(existing) if *existing == action => Ok(()),
            Some(existing) => Err(CacheboundError::GraphConstruction(format!(
                "action {} has conflicting definitions ({:?} vs {:?})",
                action.id, existing, action
            ))),
            None => {
                self.actions.insert(action.id, action);
                Ok(())
            }
        }
    }

    pub fn get(&self, id: ActionId) -> Option<&Action> {
        self.actions.get(&id)
    }

    /// Like [`ActionCatalog::get`], but an unknown id is an error.
    pub fn action(&self, id: ActionId) -> Result<&Action> {
        self.get(id).ok_or_else(|| {
            CacheboundError::GraphConstruction(format!("unknown action id {id}"))
        })
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.values()
    }
}

fn random_label<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..LABEL_LEN)
        .map(|_| LABEL_CHARSET[rng.random_range(0..LABEL_CHARSET.len())] as char)
        .collect()
}
