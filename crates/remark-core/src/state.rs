//! Widget state and the reducer that advances it.

use std::collections::HashSet;

use crate::record::CommentRecord;
use crate::reconcile::reconcile;
use crate::thread::{attached_ids, build_tree, CommentNode};

/// Client-side state for one comment widget instance.
///
/// Replaced wholesale by [`reduce`], never mutated in place; one value per
/// widget, discarded on teardown.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadState {
    /// Root comments in first-occurrence order, replies nested under each.
    pub tree: Vec<CommentNode>,
    /// Every id observed across all refreshes.
    pub known_ids: HashSet<i64>,
    /// Ids introduced by the most recent refresh. Replaced each refresh,
    /// never accumulated.
    pub new_ids: HashSet<i64>,
    /// Total comment count. Authoritative right after a refresh
    /// (`known_ids.len()`); advisory in between, via counter polls.
    pub counter: usize,
}

impl ThreadState {
    /// Fresh state; `initial_count` seeds the advisory counter.
    #[must_use]
    pub fn new(initial_count: usize) -> Self {
        Self {
            tree: Vec::new(),
            known_ids: HashSet::new(),
            new_ids: HashSet::new(),
            counter: initial_count,
        }
    }

    /// How many comments the latest refresh introduced.
    #[must_use]
    pub fn new_count(&self) -> usize {
        self.new_ids.len()
    }

    /// How many comments the advisory counter reports beyond what has been
    /// materialized. Drives the "show N new comments" affordance.
    #[must_use]
    pub fn unseen_hint(&self) -> usize {
        self.counter.saturating_sub(self.known_ids.len())
    }
}

/// One step of the widget's lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the tree from a full list fetch.
    RefreshTree(Vec<CommentRecord>),
    /// Advisory counter update from a lightweight count fetch.
    SetCounter(usize),
}

/// Apply one action, producing the next state.
///
/// Total: no I/O, no failure. All effects of a refresh (tree, id sets,
/// counter) come from one snapshot of the batch.
#[must_use]
pub fn reduce(state: &ThreadState, action: Action) -> ThreadState {
    match action {
        Action::RefreshTree(batch) => {
            let tree = build_tree(&batch);
            // Orphans never reach the tree; keeping them out of the id sets
            // keeps the counter equal to the displayed comment count.
            let batch_ids = attached_ids(&tree);
            let merged = reconcile(&state.known_ids, &batch_ids);
            ThreadState {
                tree,
                known_ids: merged.known_ids,
                new_ids: merged.new_ids,
                counter: merged.counter,
            }
        }
        Action::SetCounter(count) => ThreadState {
            counter: count,
            ..state.clone()
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn rec(id: i64, parent_id: i64, level: i64) -> CommentRecord {
        CommentRecord::new(id, parent_id, level)
    }

    fn set(ids: &[i64]) -> HashSet<i64> {
        ids.iter().copied().collect()
    }

    #[test]
    fn first_refresh_builds_tree_without_badging() {
        let state = ThreadState::new(0);
        let next = reduce(
            &state,
            Action::RefreshTree(vec![rec(9, 9, 0), rec(10, 9, 1)]),
        );

        assert_eq!(next.tree.len(), 1);
        assert_eq!(next.tree[0].record.id, 9);
        assert_eq!(next.tree[0].children[0].record.id, 10);
        assert_eq!(next.known_ids, set(&[9, 10]));
        assert!(next.new_ids.is_empty());
        assert_eq!(next.counter, 2);
    }

    #[test]
    fn second_refresh_badges_only_the_addition() {
        let state = ThreadState::new(0);
        let first = reduce(
            &state,
            Action::RefreshTree(vec![rec(9, 9, 0), rec(10, 9, 1)]),
        );
        let second = reduce(
            &first,
            Action::RefreshTree(vec![rec(9, 9, 0), rec(10, 9, 1), rec(11, 10, 2)]),
        );

        assert_eq!(second.tree[0].children[0].children[0].record.id, 11);
        assert_eq!(second.known_ids, set(&[9, 10, 11]));
        assert_eq!(second.new_ids, set(&[11]));
        assert_eq!(second.counter, 3);
        assert_eq!(second.new_count(), 1);
    }

    #[test]
    fn identical_refresh_is_idempotent() {
        let batch = vec![rec(9, 9, 0), rec(10, 9, 1)];
        let first = reduce(&ThreadState::new(0), Action::RefreshTree(batch.clone()));
        let second = reduce(&first, Action::RefreshTree(batch));

        assert_eq!(second.tree, first.tree);
        assert_eq!(second.known_ids, first.known_ids);
        assert!(second.new_ids.is_empty());
        assert_eq!(second.counter, first.counter);
    }

    #[test]
    fn counter_matches_known_ids_after_refresh() {
        let state = reduce(
            &ThreadState::new(7),
            Action::RefreshTree(vec![rec(1, 1, 0), rec(2, 1, 1), rec(3, 3, 0)]),
        );
        assert_eq!(state.counter, state.known_ids.len());
    }

    #[test]
    fn orphans_stay_out_of_tree_and_id_sets() {
        let state = reduce(&ThreadState::new(0), Action::RefreshTree(vec![rec(5, 99, 1)]));
        assert!(state.tree.is_empty());
        assert!(state.known_ids.is_empty());
        assert!(state.new_ids.is_empty());
        assert_eq!(state.counter, 0);
    }

    #[test]
    fn known_ids_grow_monotonically() {
        let s0 = ThreadState::new(0);
        let s1 = reduce(&s0, Action::RefreshTree(vec![rec(1, 1, 0)]));
        let s2 = reduce(
            &s1,
            Action::RefreshTree(vec![rec(1, 1, 0), rec(2, 2, 0)]),
        );
        let s3 = reduce(
            &s2,
            Action::RefreshTree(vec![rec(1, 1, 0), rec(2, 2, 0), rec(3, 1, 1)]),
        );

        assert!(s1.known_ids.is_subset(&s2.known_ids));
        assert!(s2.known_ids.is_subset(&s3.known_ids));
        assert_eq!(s3.known_ids, set(&[1, 2, 3]));
    }

    #[test]
    fn new_ids_are_replaced_not_accumulated() {
        let s0 = ThreadState::new(0);
        let s1 = reduce(&s0, Action::RefreshTree(vec![rec(1, 1, 0)]));
        let s2 = reduce(
            &s1,
            Action::RefreshTree(vec![rec(1, 1, 0), rec(2, 2, 0)]),
        );
        let s3 = reduce(
            &s2,
            Action::RefreshTree(vec![rec(1, 1, 0), rec(2, 2, 0), rec(3, 1, 1)]),
        );

        assert_eq!(s2.new_ids, set(&[2]));
        assert_eq!(s3.new_ids, set(&[3]));
    }

    #[test]
    fn set_counter_touches_only_the_counter() {
        let before = reduce(
            &ThreadState::new(0),
            Action::RefreshTree(vec![rec(9, 9, 0), rec(10, 9, 1)]),
        );
        let after = reduce(&before, Action::SetCounter(7));

        assert_eq!(after.counter, 7);
        assert_eq!(after.tree, before.tree);
        assert_eq!(after.known_ids, before.known_ids);
        assert_eq!(after.new_ids, before.new_ids);
    }

    #[test]
    fn unseen_hint_tracks_counter_ahead_of_known() {
        let state = reduce(
            &ThreadState::new(0),
            Action::RefreshTree(vec![rec(9, 9, 0), rec(10, 9, 1)]),
        );
        assert_eq!(state.unseen_hint(), 0);

        let polled = reduce(&state, Action::SetCounter(5));
        assert_eq!(polled.unseen_hint(), 3);

        // A stale counter below the known count never underflows.
        let stale = reduce(&state, Action::SetCounter(1));
        assert_eq!(stale.unseen_hint(), 0);
    }

    #[test]
    fn initial_counter_is_seeded() {
        let state = ThreadState::new(12);
        assert_eq!(state.counter, 12);
        assert!(state.tree.is_empty());
        assert!(state.known_ids.is_empty());
        assert_eq!(state.unseen_hint(), 12);
    }

    #[test]
    fn reducer_leaves_input_untouched() {
        let state = ThreadState::new(0);
        let _ = reduce(&state, Action::RefreshTree(vec![rec(1, 1, 0)]));
        assert!(state.tree.is_empty());
        assert!(state.known_ids.is_empty());
        assert_eq!(state.counter, 0);
    }
}
