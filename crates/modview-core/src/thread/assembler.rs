//! Thread tree reconstruction

use crate::record::CommentRecord;
use crate::types::CommentId;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// One record of a thread with its nesting level (root = 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadEntry<'a> {
    pub record: &'a CommentRecord,
    pub depth: usize,
}

impl ThreadEntry<'_> {
    /// Indentation level, capped at `max`
    pub fn indent_level(&self, max: usize) -> usize {
        self.depth.min(max)
    }
}

/// Build the display order of one thread.
///
/// Records are sorted by `(step, comment_id)`, grouped under their parents
/// and walked depth-first from each root in sorted order. Records whose
/// parent is not reachable from a root are left out. An empty input gives
/// an empty output.
pub fn assemble_thread<'a>(records: impl IntoIterator<Item = &'a CommentRecord>) -> Vec<ThreadEntry<'a>> {
    let mut sorted: Vec<&'a CommentRecord> = records.into_iter().collect();
    sorted.sort_by_key(|r| (r.step, r.comment_id));

    let mut roots = Vec::new();
    let mut children: HashMap<CommentId, Vec<&'a CommentRecord>> = HashMap::new();
    for record in &sorted {
        match record.parent_id {
            None => roots.push(*record),
            Some(parent) => children.entry(parent).or_default().push(*record),
        }
    }

    let mut ordered = Vec::with_capacity(sorted.len());
    let mut expanded: HashSet<CommentId> = HashSet::with_capacity(sorted.len());
    let mut stack: Vec<ThreadEntry<'a>> = roots
        .iter()
        .rev()
        .map(|&record| ThreadEntry { record, depth: 0 })
        .collect();

    while let Some(entry) = stack.pop() {
        ordered.push(entry);

        // A repeated id would otherwise revisit the same children forever
        if !expanded.insert(entry.record.comment_id) {
            continue;
        }
        if let Some(replies) = children.get(&entry.record.comment_id) {
            stack.extend(replies.iter().rev().map(|&record| ThreadEntry {
                record,
                depth: entry.depth + 1,
            }));
        }
    }

    let omitted = sorted.len().saturating_sub(ordered.len());
    if omitted > 0 {
        debug!(
            "Thread {}: {} record(s) unreachable from its root were omitted",
            sorted[0].thread_id, omitted
        );
    }
    if roots.len() > 1 {
        debug!("Thread {} has {} roots", sorted[0].thread_id, roots.len());
    }

    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::model::fixtures::record;
    use crate::types::ThreadId;
    use pretty_assertions::assert_eq;

    fn ids(entries: &[ThreadEntry<'_>]) -> Vec<(i64, usize)> {
        entries
            .iter()
            .map(|e| (e.record.comment_id.0, e.depth))
            .collect()
    }

    fn sample_thread() -> Vec<CommentRecord> {
        // 1
        // ├── 2
        // │   ├── 4
        // │   └── 6
        // └── 3
        //     └── 5
        vec![
            record(5, 0, Some(3), 4),
            record(3, 0, Some(1), 2),
            record(6, 0, Some(2), 5),
            record(1, 0, None, 0),
            record(4, 0, Some(2), 3),
            record(2, 0, Some(1), 1),
        ]
    }

    #[test]
    fn test_preorder_traversal() {
        let records = sample_thread();
        let ordered = assemble_thread(&records);
        assert_eq!(
            ids(&ordered),
            vec![(1, 0), (2, 1), (4, 2), (6, 2), (3, 1), (5, 2)]
        );
    }

    #[test]
    fn test_first_entry_is_root() {
        let records = sample_thread();
        let ordered = assemble_thread(&records);
        assert_eq!(ordered[0].depth, 0);
        assert!(ordered[0].record.is_root());
    }

    #[test]
    fn test_child_depth_is_parent_depth_plus_one() {
        let records = sample_thread();
        let ordered = assemble_thread(&records);

        for (i, entry) in ordered.iter().enumerate().skip(1) {
            let parent_id = entry.record.parent_id.unwrap();
            let parent = ordered[..i]
                .iter()
                .find(|e| e.record.comment_id == parent_id)
                .unwrap();
            assert_eq!(entry.depth, parent.depth + 1);
        }
    }

    #[test]
    fn test_siblings_ordered_by_step_then_id() {
        let records = vec![
            record(1, 0, None, 0),
            record(9, 0, Some(1), 2),
            record(4, 0, Some(1), 2),
            record(7, 0, Some(1), 1),
        ];
        let ordered = assemble_thread(&records);
        assert_eq!(ids(&ordered), vec![(1, 0), (7, 1), (4, 1), (9, 1)]);
    }

    #[test]
    fn test_idempotent() {
        let records = sample_thread();
        assert_eq!(assemble_thread(&records), assemble_thread(&records));
    }

    #[test]
    fn test_dangling_parent_is_omitted() {
        let records = vec![
            record(1, 0, None, 0),
            record(2, 0, Some(1), 1),
            record(3, 0, Some(99), 2),
        ];
        let ordered = assemble_thread(&records);
        assert_eq!(ids(&ordered), vec![(1, 0), (2, 1)]);
    }

    #[test]
    fn test_subtree_under_dangling_parent_is_omitted() {
        let records = vec![
            record(1, 0, None, 0),
            record(3, 0, Some(99), 1),
            record(4, 0, Some(3), 2),
        ];
        assert_eq!(ids(&assemble_thread(&records)), vec![(1, 0)]);
    }

    #[test]
    fn test_multiple_roots_in_sorted_order() {
        let records = vec![record(20, 0, None, 2), record(10, 0, None, 1)];
        let ordered = assemble_thread(&records);
        assert_eq!(ids(&ordered), vec![(10, 0), (20, 0)]);
    }

    #[test]
    fn test_multiple_roots_keep_their_subtrees_together() {
        let records = vec![
            record(1, 0, None, 0),
            record(2, 0, None, 1),
            record(3, 0, Some(1), 2),
            record(4, 0, Some(2), 3),
        ];
        let ordered = assemble_thread(&records);
        assert_eq!(ids(&ordered), vec![(1, 0), (3, 1), (2, 0), (4, 1)]);
    }

    #[test]
    fn test_empty_input() {
        let records: Vec<CommentRecord> = Vec::new();
        assert!(assemble_thread(&records).is_empty());
    }

    #[test]
    fn test_self_parent_and_cycles_are_omitted() {
        let records = vec![
            record(1, 0, None, 0),
            record(2, 0, Some(2), 1),
            record(3, 0, Some(4), 2),
            record(4, 0, Some(3), 3),
        ];
        assert_eq!(ids(&assemble_thread(&records)), vec![(1, 0)]);
    }

    #[test]
    fn test_duplicate_ids_terminate() {
        let records = vec![
            record(1, 0, None, 0),
            record(2, 0, Some(1), 1),
            record(1, 0, Some(2), 2),
        ];
        let ordered = assemble_thread(&records);
        assert_eq!(ids(&ordered), vec![(1, 0), (2, 1), (1, 2)]);
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let depth = 100_000;
        let records: Vec<CommentRecord> = (0..depth)
            .map(|i| record(i, 0, if i == 0 { None } else { Some(i - 1) }, i))
            .collect();

        let ordered = assemble_thread(&records);
        assert_eq!(ordered.len(), depth as usize);
        assert_eq!(ordered.last().unwrap().depth, depth as usize - 1);
        assert_eq!(ordered.last().unwrap().indent_level(4), 4);
    }

    #[test]
    fn test_accepts_borrowed_records() {
        let records = sample_thread();
        let refs: Vec<&CommentRecord> = records
            .iter()
            .filter(|r| r.thread_id == ThreadId(0))
            .collect();
        assert_eq!(assemble_thread(refs.iter().copied()).len(), 6);
    }
}
