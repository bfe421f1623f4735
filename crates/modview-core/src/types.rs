//! Core type definitions for modview

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a single comment (or post), unique across a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(pub i64);

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CommentId {
    fn from(value: i64) -> Self {
        CommentId(value)
    }
}

/// Identifier grouping records into one conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreadId(pub i64);

impl ThreadId {
    /// One-based number shown in post titles
    pub fn post_number(&self) -> i64 {
        self.0.saturating_add(1)
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ThreadId {
    fn from(value: i64) -> Self {
        ThreadId(value)
    }
}

/// Identifier of a simulated user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorId(pub i64);

impl AuthorId {
    /// Display form used in headers and meta lines
    pub fn display_name(&self) -> String {
        format!("User {}", self.0)
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for AuthorId {
    fn from(value: i64) -> Self {
        AuthorId(value)
    }
}

/// Subreddit filter: everything, or a single label
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Category {
    #[default]
    All,
    Subreddit(String),
}

impl Category {
    /// Label of the sentinel that selects every subreddit
    pub const ALL_LABEL: &'static str = "All";

    /// Check whether a record's subreddit passes this filter
    pub fn matches(&self, subreddit: &str) -> bool {
        match self {
            Category::All => true,
            Category::Subreddit(name) => name == subreddit,
        }
    }

    /// Get the label shown to users
    pub fn label(&self) -> &str {
        match self {
            Category::All => Self::ALL_LABEL,
            Category::Subreddit(name) => name,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(Self::ALL_LABEL) {
            Category::All
        } else {
            Category::Subreddit(trimmed.to_string())
        }
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::from(s.as_str())
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.label().to_string()
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Category::from(s))
    }
}

/// Which dataset a view is rendered from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Original conversations, no moderator
    Unmoderated,
    /// Conversations with moderation decisions applied
    Moderated,
}

impl ViewMode {
    /// Both modes in display order
    pub const ALL: [ViewMode; 2] = [ViewMode::Unmoderated, ViewMode::Moderated];

    /// Short lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Unmoderated => "unmoderated",
            ViewMode::Moderated => "moderated",
        }
    }

    /// Label of the tab that selects this view
    pub fn tab_label(&self) -> &'static str {
        match self {
            ViewMode::Unmoderated => "Unmoderated view",
            ViewMode::Moderated => "Moderated view (ToxiMuncher Lite)",
        }
    }

    /// Heading shown above the threads of this view
    pub fn heading(&self) -> &'static str {
        match self {
            ViewMode::Unmoderated => "Original conversations (no moderator)",
            ViewMode::Moderated => "Conversations with ToxiMuncher (Lite model)",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = crate::ModviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unmoderated" | "raw" => Ok(ViewMode::Unmoderated),
            "moderated" | "mod" => Ok(ViewMode::Moderated),
            other => Err(crate::ModviewError::Validation(format!(
                "Unknown view mode: {}",
                other
            ))),
        }
    }
}
