use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Global action identifier. Actions are numbered by generation index, so
/// ids are dense in `0..nb_actions`.
pub type ActionId = usize;

/// One unit of computation: the output it produces has a storage footprint
/// (`size_mb`) and takes `recompute_cost` seconds to regenerate from its
/// parents' outputs.
///
/// Identity is the `id`; `name` is a display label only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: ActionId,
    pub size_mb: f64,
    pub recompute_cost: f64,
    pub name: String,
}

impl Action {
    pub fn new(id: ActionId, size_mb: f64, recompute_cost: f64, name: impl Into<String>) -> Self {
        Self {
            id,
            size_mb,
            recompute_cost,
            name: name.into(),
        }
    }
}

/// Which actions the oracle may place in the cache when evaluating step `t`.
///
/// - `Carryover`: only actions produced by an earlier workflow whose last
///   reference is at or after `t` (default). An action cannot be
///   materialized before its first computation.
/// - `Union`: carryover plus the actions introduced at `t` that are
///   referenced again later.
///
/// Config values go through [`FromStr`], so they are trimmed and
/// case-insensitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum CandidatePolicy {
    #[default]
    Carryover,
    Union,
}

impl TryFrom<String> for CandidatePolicy {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for CandidatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "carryover" => Ok(CandidatePolicy::Carryover),
            "union" => Ok(CandidatePolicy::Union),
            other => Err(format!(
                "invalid candidate_policy: {other} (expected \"carryover\" or \"union\")"
            )),
        }
    }
}
