//! Comment record data models

use crate::error::{ModviewError, Result};
use crate::types::{AuthorId, CommentId, ThreadId, ViewMode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Notice shown in place of a flagged comment that carries no message of its own
pub const DEFAULT_MODERATION_MESSAGE: &str =
    "ToxiMuncher (Lite): comment removed for toxic or aggressive behaviour.";

/// One row of simulated forum data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    /// Unique comment identifier
    pub comment_id: CommentId,
    /// Conversation this record belongs to
    pub thread_id: ThreadId,
    /// Parent comment; `None` for the thread's post
    pub parent_id: Option<CommentId>,
    /// Creation-order counter
    pub step: i64,
    /// Simulated author
    pub author_id: AuthorId,
    /// Category label
    pub subreddit: String,
    /// Body content
    pub text: String,
    /// Whether moderation removed this comment (moderated dataset only)
    #[serde(default)]
    pub flagged: bool,
    /// Replacement content for a flagged comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moderation_message: Option<String>,
}

impl CommentRecord {
    /// Check whether this record is a thread root
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Display form of the author
    pub fn author_display(&self) -> String {
        self.author_id.display_name()
    }

    /// Moderation message, falling back to the default notice
    pub fn moderation_message_or_default(&self) -> &str {
        self.moderation_message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(DEFAULT_MODERATION_MESSAGE)
    }

    /// Content to display in the given view.
    ///
    /// Returns the content and whether it replaces a removed comment. The
    /// unmoderated view always shows the original text. `notice` overrides
    /// the default notice for flagged records without a message.
    pub fn display_content<'a>(&'a self, mode: ViewMode, notice: Option<&'a str>) -> (&'a str, bool) {
        match mode {
            ViewMode::Moderated if self.flagged => {
                let message = self
                    .moderation_message
                    .as_deref()
                    .filter(|m| !m.trim().is_empty());
                let content = match (message, notice) {
                    (Some(m), _) => m,
                    (None, Some(n)) => n,
                    (None, None) => DEFAULT_MODERATION_MESSAGE,
                };
                (content, true)
            }
            _ => (self.text.as_str(), false),
        }
    }
}

/// All records of one view, validated for unique comment ids
#[derive(Debug, Clone)]
pub struct Dataset {
    mode: ViewMode,
    records: Vec<CommentRecord>,
}

impl Dataset {
    /// Create a dataset, rejecting duplicate comment ids
    pub fn new(mode: ViewMode, records: Vec<CommentRecord>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.comment_id) {
                return Err(ModviewError::DuplicateCommentId {
                    dataset: mode.as_str().to_string(),
                    comment_id: record.comment_id.0,
                });
            }
        }
        Ok(Self { mode, records })
    }

    /// Create an empty dataset
    pub fn empty(mode: ViewMode) -> Self {
        Self {
            mode,
            records: Vec::new(),
        }
    }

    /// View this dataset belongs to
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// All records in input order
    pub fn records(&self) -> &[CommentRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the dataset has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records marked as removed by moderation
    pub fn flagged_count(&self) -> usize {
        self.records.iter().filter(|r| r.flagged).count()
    }
}
