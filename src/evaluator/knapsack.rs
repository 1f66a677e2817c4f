// src/evaluator/knapsack.rs

//! Exact 0/1 knapsack over integer sizes.

use crate::errors::{CacheboundError, Result};
use crate::types::{Action, ActionId};

/// One selectable item: integer size, value, and the action it stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct KnapsackItem {
    pub size: u64,
    pub value: f64,
    pub action: ActionId,
}

impl KnapsackItem {
    pub fn new(size: u64, value: f64, action: ActionId) -> Self {
        Self {
            size,
            value,
            action,
        }
    }

    /// Item for `action` worth `value`. Sizes are rounded up to whole MB so
    /// a selection that fits in integer capacity also fits in real size.
    pub fn for_action(action: &Action, value: f64) -> Self {
        Self::new(action.size_mb.ceil() as u64, value, action.id)
    }
}

/// The chosen items, in input order, and their totals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnapsackSolution {
    pub items: Vec<KnapsackItem>,
    pub total_value: f64,
    pub total_size: u64,
}

/// Choose the subset of `items` with the largest total value whose total
/// size fits in `capacity`.
///
/// `table[n][lim]` is the best value using the first `n` items within size
/// `lim`. Reconstruction walks back from `(len, capacity)` and treats an item
/// as excluded whenever excluding it gives the same value. Items larger than
/// the capacity are never selected.
pub fn knapsack(items: &[KnapsackItem], capacity: i64) -> Result<KnapsackSolution> {
    if capacity < 0 {
        return Err(CacheboundError::Capacity(capacity));
    }

    // Any capacity beyond the total size behaves exactly like the total size.
    let total_size: u64 = items.iter().map(|i| i.size).sum();
    let capacity = (capacity as u64).min(total_size) as usize;

    let width = capacity + 1;
    let mut table = vec![0.0_f64; (items.len() + 1) * width];
    let at = |n: usize, lim: usize| n * width + lim;

    for (idx, item) in items.iter().enumerate() {
        let n = idx + 1;
        for lim in 0..=capacity {
            let without = table[at(n - 1, lim)];
            table[at(n, lim)] = if item.size > lim as u64 {
                without
            } else {
                let with = table[at(n - 1, lim - item.size as usize)] + item.value;
                if with > without { with } else { without }
            };
        }
    }

    let mut chosen = Vec::new();
    let mut lim = capacity;
    for n in (1..=items.len()).rev() {
        if table[at(n, lim)] == table[at(n - 1, lim)] {
            continue;
        }
        let item = &items[n - 1];
        chosen.push(item.clone());
        lim -= item.size as usize;
    }
    chosen.reverse();

    Ok(KnapsackSolution {
        total_value: chosen.iter().map(|i| i.value).sum(),
        total_size: chosen.iter().map(|i| i.size).sum(),
        items: chosen,
    })
}
