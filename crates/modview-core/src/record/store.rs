//! Read-only store over the unmoderated and moderated datasets

use super::model::{CommentRecord, Dataset};
use super::parity::ParityReport;
use crate::error::{ModviewError, Result};
use crate::types::{Category, ThreadId, ViewMode};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Immutable handle over both datasets, created once at startup
#[derive(Debug, Clone)]
pub struct RecordStore {
    unmoderated: Dataset,
    moderated: Dataset,
}

impl RecordStore {
    /// Create a store from the two datasets
    pub fn new(unmoderated: Dataset, moderated: Dataset) -> Result<Self> {
        if unmoderated.mode() != ViewMode::Unmoderated || moderated.mode() != ViewMode::Moderated {
            return Err(ModviewError::Validation(
                "Datasets passed in the wrong order".to_string(),
            ));
        }

        info!(
            "Loaded {} unmoderated and {} moderated records ({} flagged)",
            unmoderated.len(),
            moderated.len(),
            moderated.flagged_count()
        );

        Ok(Self {
            unmoderated,
            moderated,
        })
    }

    /// Get the dataset backing a view
    pub fn dataset(&self, mode: ViewMode) -> &Dataset {
        match mode {
            ViewMode::Unmoderated => &self.unmoderated,
            ViewMode::Moderated => &self.moderated,
        }
    }

    /// Compare the structure of both datasets
    pub fn parity(&self) -> ParityReport {
        ParityReport::compare(&self.unmoderated, &self.moderated)
    }

    /// Restrict both datasets to one subreddit, or keep everything for `Category::All`
    pub fn filter_by_category(&self, category: &Category) -> RecordView<'_> {
        let view = RecordView {
            category: category.clone(),
            unmoderated: filter_records(self.unmoderated.records(), category),
            moderated: filter_records(self.moderated.records(), category),
        };
        debug!(
            "Category '{}' selects {} unmoderated / {} moderated records",
            category,
            view.unmoderated.len(),
            view.moderated.len()
        );
        view
    }

    /// Distinct subreddit labels in ascending order
    pub fn subreddits(&self) -> Vec<String> {
        subreddits(self.unmoderated.records())
    }
}

/// Both datasets restricted to one category
#[derive(Debug, Clone)]
pub struct RecordView<'a> {
    category: Category,
    unmoderated: Vec<&'a CommentRecord>,
    moderated: Vec<&'a CommentRecord>,
}

impl<'a> RecordView<'a> {
    /// Category this view was filtered by
    pub fn category(&self) -> &Category {
        &self.category
    }

    /// Records of one view, in input order
    pub fn records(&self, mode: ViewMode) -> &[&'a CommentRecord] {
        match mode {
            ViewMode::Unmoderated => &self.unmoderated,
            ViewMode::Moderated => &self.moderated,
        }
    }

    /// Thread ids to render, shared by both views.
    ///
    /// Taken from the unmoderated records so that both views list the same
    /// threads in the same order.
    pub fn thread_ids(&self) -> Vec<ThreadId> {
        list_thread_ids(self.unmoderated.iter().copied())
    }

    /// Records of one thread in one view
    pub fn records_for_thread(&self, mode: ViewMode, thread_id: ThreadId) -> Vec<&'a CommentRecord> {
        records_for_thread(self.records(mode).iter().copied(), thread_id)
    }

    /// Check if the filter selected nothing
    pub fn is_empty(&self) -> bool {
        self.unmoderated.is_empty() && self.moderated.is_empty()
    }
}

fn filter_records<'a>(records: &'a [CommentRecord], category: &Category) -> Vec<&'a CommentRecord> {
    records
        .iter()
        .filter(|r| category.matches(&r.subreddit))
        .collect()
}

/// Distinct thread ids in ascending order
pub fn list_thread_ids<'a>(records: impl IntoIterator<Item = &'a CommentRecord>) -> Vec<ThreadId> {
    records
        .into_iter()
        .map(|r| r.thread_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Records belonging to one thread, in input order
pub fn records_for_thread<'a>(
    records: impl IntoIterator<Item = &'a CommentRecord>,
    thread_id: ThreadId,
) -> Vec<&'a CommentRecord> {
    records
        .into_iter()
        .filter(|r| r.thread_id == thread_id)
        .collect()
}

/// Distinct subreddit labels in ascending order
pub fn subreddits<'a>(records: impl IntoIterator<Item = &'a CommentRecord>) -> Vec<String> {
    records
        .into_iter()
        .map(|r| r.subreddit.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
