//! Render instruction models
//!
//! These are the linear, ready-to-draw forms of a view: one entry per
//! thread, each with its post header and its comments in display order.

use crate::types::{Category, CommentId, ThreadId, ViewMode};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Header block of a thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostHeader {
    pub comment_id: CommentId,
    /// One-based post number
    pub post_number: i64,
    /// "Post N in subreddit"
    pub title: String,
    pub subreddit: String,
    /// Author display form, e.g. "User 3"
    pub author: String,
    pub content: String,
    /// Whether `content` replaces a removed post
    pub removed: bool,
}

/// One comment line below the post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedComment {
    pub comment_id: CommentId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CommentId>,
    pub author: String,
    pub step: i64,
    /// True nesting level
    pub depth: usize,
    /// Visual nesting level, capped
    pub indent_level: usize,
    pub content: String,
    pub removed: bool,
}

impl RenderedComment {
    /// Meta line shown above the comment body
    pub fn meta(&self) -> String {
        format!("{} • step {}", self.author, self.step)
    }
}

/// A thread ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedThread {
    pub thread_id: ThreadId,
    pub post: PostHeader,
    pub comments: Vec<RenderedComment>,
}

impl RenderedThread {
    /// Number of comments marked as removed, post included
    pub fn removed_count(&self) -> usize {
        usize::from(self.post.removed) + self.comments.iter().filter(|c| c.removed).count()
    }
}

/// All threads of one view mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedView {
    pub mode: ViewMode,
    pub tab_label: String,
    pub heading: String,
    pub threads: Vec<RenderedThread>,
}

impl RenderedView {
    /// Total number of rendered entries (posts and comments)
    pub fn entry_count(&self) -> usize {
        self.threads.iter().map(|t| 1 + t.comments.len()).sum()
    }
}

/// A complete output document: one or more views under a page title
#[derive(Debug, Clone, Serialize)]
pub struct RenderDocument {
    pub title: String,
    pub subtitle: String,
    pub category: Category,
    pub generated_at: DateTime<Utc>,
    /// Deepest indentation level any comment may use
    pub max_indent_depth: usize,
    pub views: Vec<RenderedView>,
}

impl RenderDocument {
    /// Check if no view has any thread
    pub fn is_empty(&self) -> bool {
        self.views.iter().all(|v| v.threads.is_empty())
    }
}
