//! Builds render instructions from filtered records

use super::model::{PostHeader, RenderDocument, RenderedComment, RenderedThread, RenderedView};
use crate::config::RenderConfig;
use crate::record::{CommentRecord, RecordStore, RecordView};
use crate::thread::{assemble_thread, ThreadEntry};
use crate::types::{Category, ThreadId, ViewMode};
use chrono::Utc;
use tracing::debug;

/// Default cap on visual indentation
pub const DEFAULT_MAX_INDENT_DEPTH: usize = 4;

/// Largest accepted indentation limit
pub const MAX_INDENT_DEPTH_LIMIT: usize = 64;

/// Turns record views into rendered threads
#[derive(Debug, Clone)]
pub struct ViewBuilder {
    max_indent_depth: usize,
    moderation_notice: Option<String>,
    title: String,
    subtitle: String,
}

impl ViewBuilder {
    /// Create a builder with default settings
    pub fn new() -> Self {
        Self::from_config(&RenderConfig::default())
    }

    /// Create a builder from render configuration
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            max_indent_depth: config.max_indent_depth,
            moderation_notice: config.moderation_notice.clone(),
            title: config.page_title.clone(),
            subtitle: config.page_subtitle.clone(),
        }
    }

    /// Set the indentation cap
    pub fn with_max_indent_depth(mut self, depth: usize) -> Self {
        self.max_indent_depth = depth;
        self
    }

    /// Set the notice used for flagged records without a message
    pub fn with_moderation_notice(mut self, notice: impl Into<String>) -> Self {
        self.moderation_notice = Some(notice.into());
        self
    }

    /// Render every thread of a filtered view in one mode
    pub fn build_view(&self, records: &RecordView<'_>, mode: ViewMode) -> RenderedView {
        let threads = records
            .thread_ids()
            .into_iter()
            .filter_map(|thread_id| {
                let thread = self.build_thread(thread_id, records.records_for_thread(mode, thread_id), mode);
                if thread.is_none() {
                    debug!("Thread {} has no records in the {} view", thread_id, mode);
                }
                thread
            })
            .collect();

        RenderedView {
            mode,
            tab_label: mode.tab_label().to_string(),
            heading: mode.heading().to_string(),
            threads,
        }
    }

    /// Render one thread, or `None` when nothing is left to show
    pub fn build_thread<'a>(
        &self,
        thread_id: ThreadId,
        records: impl IntoIterator<Item = &'a CommentRecord>,
        mode: ViewMode,
    ) -> Option<RenderedThread> {
        let ordered = assemble_thread(records);
        let (first, rest) = ordered.split_first()?;

        Some(RenderedThread {
            thread_id,
            post: self.post_header(thread_id, first.record, mode),
            comments: rest.iter().map(|entry| self.comment(entry, mode)).collect(),
        })
    }

    /// Render the selected modes of one category into a document
    pub fn build_document(
        &self,
        store: &RecordStore,
        category: &Category,
        modes: &[ViewMode],
    ) -> RenderDocument {
        let records = store.filter_by_category(category);
        let views = modes.iter().map(|mode| self.build_view(&records, *mode)).collect();

        RenderDocument {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            category: records.category().clone(),
            generated_at: Utc::now(),
            max_indent_depth: self.max_indent_depth,
            views,
        }
    }

    fn post_header(&self, thread_id: ThreadId, record: &CommentRecord, mode: ViewMode) -> PostHeader {
        let (content, removed) = record.display_content(mode, self.moderation_notice.as_deref());
        PostHeader {
            comment_id: record.comment_id,
            post_number: thread_id.post_number(),
            title: format!("Post {} in {}", thread_id.post_number(), record.subreddit),
            subreddit: record.subreddit.clone(),
            author: record.author_display(),
            content: content.to_string(),
            removed,
        }
    }

    fn comment(&self, entry: &ThreadEntry<'_>, mode: ViewMode) -> RenderedComment {
        let record = entry.record;
        let (content, removed) = record.display_content(mode, self.moderation_notice.as_deref());
        RenderedComment {
            comment_id: record.comment_id,
            parent_id: record.parent_id,
            author: record.author_display(),
            step: record.step,
            depth: entry.depth,
            indent_level: entry.indent_level(self.max_indent_depth),
            content: content.to_string(),
            removed,
        }
    }
}

impl Default for ViewBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::model::fixtures::*;
    use crate::record::Dataset;
    use crate::record::DEFAULT_MODERATION_MESSAGE;
    use pretty_assertions::assert_eq;

    fn create_test_store() -> RecordStore {
        let unmoderated = vec![
            in_subreddit(record(1, 0, None, 0), "pics"),
            in_subreddit(record(2, 0, Some(1), 1), "pics"),
            in_subreddit(record(3, 0, Some(2), 2), "pics"),
            in_subreddit(record(4, 0, Some(3), 3), "pics"),
            in_subreddit(record(5, 0, Some(4), 4), "pics"),
            in_subreddit(record(6, 0, Some(5), 5), "pics"),
            in_subreddit(record(10, 1, None, 0), "news"),
            in_subreddit(record(11, 1, Some(10), 1), "news"),
        ];
        let moderated = unmoderated
            .iter()
            .cloned()
            .map(|r| match r.comment_id.0 {
                2 => flagged(r, Some("X")),
                11 => flagged(r, None),
                _ => r,
            })
            .collect();

        RecordStore::new(
            Dataset::new(ViewMode::Unmoderated, unmoderated).unwrap(),
            Dataset::new(ViewMode::Moderated, moderated).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_unmoderated_view_shows_original_text() {
        let store = create_test_store();
        let records = store.filter_by_category(&Category::All);
        let view = ViewBuilder::new().build_view(&records, ViewMode::Unmoderated);

        assert_eq!(view.threads.len(), 2);
        let thread = &view.threads[0];
        assert_eq!(thread.post.title, "Post 1 in pics");
        assert_eq!(thread.post.author, "User 10");
        assert_eq!(thread.comments[0].content, "comment 2");
        assert!(!thread.comments[0].removed);
    }

    #[test]
    fn test_moderated_view_substitutes_flagged() {
        let store = create_test_store();
        let records = store.filter_by_category(&Category::All);
        let view = ViewBuilder::new().build_view(&records, ViewMode::Moderated);

        let pics = &view.threads[0];
        assert_eq!(pics.comments[0].content, "X");
        assert!(pics.comments[0].removed);
        assert_eq!(pics.comments[1].content, "comment 3");
        assert!(!pics.comments[1].removed);

        let news = &view.threads[1];
        assert_eq!(news.comments[0].content, DEFAULT_MODERATION_MESSAGE);
        assert_eq!(news.removed_count(), 1);
    }

    #[test]
    fn test_indent_level_is_clamped() {
        let store = create_test_store();
        let records = store.filter_by_category(&Category::from("pics"));
        let view = ViewBuilder::new().build_view(&records, ViewMode::Unmoderated);

        let levels: Vec<(usize, usize)> = view.threads[0]
            .comments
            .iter()
            .map(|c| (c.depth, c.indent_level))
            .collect();
        assert_eq!(levels, vec![(1, 1), (2, 2), (3, 3), (4, 4), (5, 4)]);
    }

    #[test]
    fn test_custom_indent_cap_and_notice() {
        let store = create_test_store();
        let records = store.filter_by_category(&Category::from("news"));
        let builder = ViewBuilder::new()
            .with_max_indent_depth(0)
            .with_moderation_notice("[removed]");
        let view = builder.build_view(&records, ViewMode::Moderated);

        let comment = &view.threads[0].comments[0];
        assert_eq!(comment.indent_level, 0);
        assert_eq!(comment.depth, 1);
        assert_eq!(comment.content, "[removed]");
        assert_eq!(comment.meta(), "User 110 • step 1");
    }

    #[test]
    fn test_threads_missing_from_moderated_are_skipped() {
        let unmoderated = vec![record(1, 0, None, 0), record(5, 1, None, 0)];
        let moderated = vec![record(1, 0, None, 0)];
        let store = RecordStore::new(
            Dataset::new(ViewMode::Unmoderated, unmoderated).unwrap(),
            Dataset::new(ViewMode::Moderated, moderated).unwrap(),
        )
        .unwrap();

        let records = store.filter_by_category(&Category::All);
        let view = ViewBuilder::new().build_view(&records, ViewMode::Moderated);
        assert_eq!(view.threads.len(), 1);
        assert_eq!(view.threads[0].thread_id, ThreadId(0));
    }

    #[test]
    fn test_empty_filter_gives_empty_document() {
        let store = create_test_store();
        let doc = ViewBuilder::new().build_document(
            &store,
            &Category::from("missing"),
            &ViewMode::ALL,
        );
        assert_eq!(doc.views.len(), 2);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_build_thread_of_empty_input() {
        let records: Vec<CommentRecord> = Vec::new();
        let thread = ViewBuilder::new().build_thread(ThreadId(3), &records, ViewMode::Moderated);
        assert!(thread.is_none());
    }

    #[test]
    fn test_build_thread_with_largest_thread_id() {
        let records = vec![record(1, i64::MAX, None, 0)];
        let thread = ViewBuilder::new()
            .build_thread(ThreadId(i64::MAX), &records, ViewMode::Unmoderated)
            .unwrap();
        assert_eq!(thread.post.post_number, i64::MAX);
        assert_eq!(thread.post.title, format!("Post {} in r/test", i64::MAX));
    }

    #[test]
    fn test_document_counts() {
        let store = create_test_store();
        let doc = ViewBuilder::new().build_document(&store, &Category::All, &[ViewMode::Moderated]);
        assert_eq!(doc.views.len(), 1);
        assert_eq!(doc.views[0].entry_count(), 8);
        assert_eq!(doc.max_indent_depth, DEFAULT_MAX_INDENT_DEPTH);
    }
}
