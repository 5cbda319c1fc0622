//! Threading engine: builds ordered comment forests from flat record batches.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::record::CommentRecord;

/// Nesting depth beyond which display indentation stops growing.
pub const MAX_DISPLAY_DEPTH: usize = 10;

/// A built tree node: one comment plus its direct replies in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentNode {
    pub record: CommentRecord,
    pub children: Vec<CommentNode>,
}

/// One entry of a depth-first flattening of a forest.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatComment<'a> {
    pub record: &'a CommentRecord,
    /// Display depth, clamped to [`MAX_DISPLAY_DEPTH`].
    pub depth: usize,
}

/// Summary of a forest for banner and list displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadSummary {
    pub comment_count: usize,
    pub participant_count: usize,
    pub last_activity: Option<DateTime<Utc>>,
}

/// Build the ordered forest for a flat batch.
///
/// Roots are records with `level == 0`, in first-occurrence order. Each
/// node's children preserve their relative input order. Records whose
/// ancestor chain never reaches a root are dropped, never an error: the
/// server is expected to send a consistent subtree and the engine degrades
/// rather than raising.
///
/// Duplicate ids in a batch: the last occurrence's payload wins, the first
/// occurrence's position fixes ordering and linkage.
#[must_use]
pub fn build_tree(batch: &[CommentRecord]) -> Vec<CommentNode> {
    let index = BatchIndex::build(batch);
    index
        .root_order
        .iter()
        .filter_map(|id| materialize(*id, &index, &mut HashSet::new()))
        .collect()
}

/// Every id reachable in the forest.
#[must_use]
pub fn attached_ids(forest: &[CommentNode]) -> HashSet<i64> {
    let mut ids = HashSet::new();
    let mut stack: Vec<&CommentNode> = forest.iter().collect();
    while let Some(node) = stack.pop() {
        ids.insert(node.record.id);
        stack.extend(node.children.iter());
    }
    ids
}

/// Flatten a forest into depth-first display order.
///
/// Sibling order is preserved; depth is clamped so runaway nesting keeps a
/// readable indent.
#[must_use]
pub fn flatten(forest: &[CommentNode]) -> Vec<FlatComment<'_>> {
    let mut out = Vec::new();
    for node in forest {
        push_flat(node, 0, &mut out);
    }
    out
}

/// Summarize a forest: totals, distinct authors, most recent activity.
#[must_use]
pub fn summarize(forest: &[CommentNode]) -> ThreadSummary {
    let mut participants: HashSet<&str> = HashSet::new();
    let mut comment_count = 0;
    let mut last_activity: Option<DateTime<Utc>> = None;

    let mut stack: Vec<&CommentNode> = forest.iter().collect();
    while let Some(node) = stack.pop() {
        comment_count += 1;
        let author = node.record.user_name.trim();
        if !author.is_empty() {
            participants.insert(author);
        }
        if let Some(date) = node.record.submit_date {
            if last_activity.map_or(true, |latest| date > latest) {
                last_activity = Some(date);
            }
        }
        stack.extend(node.children.iter());
    }

    ThreadSummary {
        comment_count,
        participant_count: participants.len(),
        last_activity,
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

struct BatchIndex {
    /// Last occurrence's payload per id.
    by_id: HashMap<i64, CommentRecord>,
    /// Child ids per parent id, in input order.
    children_of: HashMap<i64, Vec<i64>>,
    /// Root ids in first-occurrence order.
    root_order: Vec<i64>,
}

impl BatchIndex {
    fn build(batch: &[CommentRecord]) -> Self {
        let mut by_id = HashMap::with_capacity(batch.len());
        let mut children_of: HashMap<i64, Vec<i64>> = HashMap::new();
        let mut root_order = Vec::new();
        let mut placed: HashSet<i64> = HashSet::with_capacity(batch.len());

        for record in batch {
            by_id.insert(record.id, record.clone());

            // First occurrence fixes position and linkage.
            if !placed.insert(record.id) {
                continue;
            }
            if record.level == 0 {
                root_order.push(record.id);
            }
            if !record.is_root() {
                children_of
                    .entry(record.parent_id)
                    .or_default()
                    .push(record.id);
            }
        }

        Self {
            by_id,
            children_of,
            root_order,
        }
    }
}

/// Construct one fresh node per id, depth-first from the index.
///
/// The seen-set terminates traversal on a malformed parent cycle instead of
/// recursing forever.
fn materialize(id: i64, index: &BatchIndex, seen: &mut HashSet<i64>) -> Option<CommentNode> {
    if !seen.insert(id) {
        return None;
    }
    let record = index.by_id.get(&id)?.clone();
    let children = index
        .children_of
        .get(&id)
        .map(|child_ids| {
            child_ids
                .iter()
                .filter_map(|child| materialize(*child, index, seen))
                .collect()
        })
        .unwrap_or_default();
    Some(CommentNode { record, children })
}

fn push_flat<'a>(node: &'a CommentNode, depth: usize, out: &mut Vec<FlatComment<'a>>) {
    out.push(FlatComment {
        record: &node.record,
        depth: depth.min(MAX_DISPLAY_DEPTH),
    });
    for child in &node.children {
        push_flat(child, depth + 1, out);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
