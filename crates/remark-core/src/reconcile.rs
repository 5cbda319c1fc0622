//! Identifier reconciliation between refreshes.

use std::collections::HashSet;

/// Result of merging a batch's ids into the known set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Every id observed across all refreshes so far.
    pub known_ids: HashSet<i64>,
    /// Ids introduced by this batch. Always a subset of `known_ids`.
    pub new_ids: HashSet<i64>,
    /// `known_ids.len()`, precomputed for the counter field.
    pub counter: usize,
}

/// Merge `batch_ids` into `prev_ids`.
///
/// On the very first refresh (`prev_ids` empty) nothing is reported new:
/// a pre-existing thread must not be badged wholesale.
#[must_use]
pub fn reconcile(prev_ids: &HashSet<i64>, batch_ids: &HashSet<i64>) -> Reconciliation {
    if prev_ids.is_empty() {
        return Reconciliation {
            known_ids: batch_ids.clone(),
            new_ids: HashSet::new(),
            counter: batch_ids.len(),
        };
    }

    let known_ids: HashSet<i64> = prev_ids.union(batch_ids).copied().collect();
    let new_ids: HashSet<i64> = batch_ids.difference(prev_ids).copied().collect();
    let counter = known_ids.len();

    Reconciliation {
        known_ids,
        new_ids,
        counter,
    }
}
