//! Structural comparison of the unmoderated and moderated datasets
//!
//! Both datasets are expected to describe the same conversations: the same
//! comment ids, each with the same thread, parent and step. Only the text and
//! moderation fields may differ.

use super::model::{CommentRecord, Dataset};
use crate::types::CommentId;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

/// A structural field that disagrees between the datasets
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMismatch {
    pub comment_id: CommentId,
    pub field: &'static str,
    pub unmoderated: String,
    pub moderated: String,
}

impl fmt::Display for FieldMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "comment {}: {} is {} (unmoderated) vs {} (moderated)",
            self.comment_id, self.field, self.unmoderated, self.moderated
        )
    }
}

/// Result of comparing the two datasets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParityReport {
    /// Comment ids only present in the unmoderated dataset
    pub only_in_unmoderated: Vec<CommentId>,
    /// Comment ids only present in the moderated dataset
    pub only_in_moderated: Vec<CommentId>,
    /// Shared comments whose structure differs
    pub mismatches: Vec<FieldMismatch>,
}

impl ParityReport {
    /// Compare two datasets record by record
    pub fn compare(unmoderated: &Dataset, moderated: &Dataset) -> Self {
        let left = index(unmoderated.records());
        let right = index(moderated.records());

        let mut report = ParityReport::default();

        for (id, record) in &left {
            match right.get(id) {
                Some(other) => report.mismatches.extend(diff_structure(record, other)),
                None => report.only_in_unmoderated.push(*id),
            }
        }
        report.only_in_moderated = right
            .keys()
            .filter(|id| !left.contains_key(*id))
            .copied()
            .collect();

        report
    }

    /// Check if the datasets are structurally identical
    pub fn is_clean(&self) -> bool {
        self.only_in_unmoderated.is_empty()
            && self.only_in_moderated.is_empty()
            && self.mismatches.is_empty()
    }

    /// Total number of problems found
    pub fn issue_count(&self) -> usize {
        self.only_in_unmoderated.len() + self.only_in_moderated.len() + self.mismatches.len()
    }

    /// Emit one warning per problem
    pub fn log_warnings(&self) {
        for id in &self.only_in_unmoderated {
            warn!("Comment {} is missing from the moderated dataset", id);
        }
        for id in &self.only_in_moderated {
            warn!("Comment {} is missing from the unmoderated dataset", id);
        }
        for mismatch in &self.mismatches {
            warn!("Structural mismatch: {}", mismatch);
        }
    }

    /// One-line summary
    pub fn summary(&self) -> String {
        if self.is_clean() {
            return "datasets are structurally identical".to_string();
        }
        format!(
            "{} only in unmoderated, {} only in moderated, {} field mismatches",
            self.only_in_unmoderated.len(),
            self.only_in_moderated.len(),
            self.mismatches.len()
        )
    }
}

fn index(records: &[CommentRecord]) -> BTreeMap<CommentId, &CommentRecord> {
    records.iter().map(|r| (r.comment_id, r)).collect()
}

fn diff_structure(left: &CommentRecord, right: &CommentRecord) -> Vec<FieldMismatch> {
    let mut out = Vec::new();
    let mut check = |field: &'static str, a: String, b: String| {
        if a != b {
            out.push(FieldMismatch {
                comment_id: left.comment_id,
                field,
                unmoderated: a,
                moderated: b,
            });
        }
    };

    check("thread_id", left.thread_id.to_string(), right.thread_id.to_string());
    check("parent_id", fmt_parent(left.parent_id), fmt_parent(right.parent_id));
    check("step", left.step.to_string(), right.step.to_string());

    out
}

fn fmt_parent(parent: Option<CommentId>) -> String {
    parent.map(|p| p.to_string()).unwrap_or_else(|| "none".to_string())
}
