//! Markdown exporter for rendered views

use super::exporter::Exporter;
use crate::error::Result;
use crate::view::{RenderDocument, RenderedComment, RenderedThread, RenderedView};

/// Markdown exporter
pub struct MarkdownExporter {
    /// Include the per-view summary line
    include_stats: bool,
}

impl MarkdownExporter {
    /// Create a new Markdown exporter with default settings
    pub fn new() -> Self {
        Self {
            include_stats: true,
        }
    }

    /// Set whether to include statistics
    pub fn with_stats(mut self, include: bool) -> Self {
        self.include_stats = include;
        self
    }

    /// Render the report header
    fn render_header(&self, doc: &RenderDocument) -> String {
        let mut header = String::new();
        header.push_str(&format!("# {}\n\n", doc.title));
        if !doc.subtitle.is_empty() {
            header.push_str(&format!("_{}_\n\n", doc.subtitle));
        }
        header.push_str(&format!("**Subreddit:** {}\n", doc.category));
        header.push_str(&format!(
            "**Generated:** {}\n\n",
            doc.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        header
    }

    fn render_view(&self, view: &RenderedView) -> String {
        let mut output = String::new();
        output.push_str(&format!("## {}\n\n", view.tab_label));
        output.push_str(&format!("### {}\n\n", view.heading));

        if self.include_stats {
            let removed: usize = view.threads.iter().map(|t| t.removed_count()).sum();
            output.push_str(&format!(
                "- **Threads:** {}\n- **Entries:** {}\n- **Removed:** {}\n\n",
                view.threads.len(),
                view.entry_count(),
                removed
            ));
        }

        if view.threads.is_empty() {
            output.push_str("_No threads to display._\n\n");
        }
        for thread in &view.threads {
            output.push_str(&self.render_thread(thread));
        }
        output
    }

    fn render_thread(&self, thread: &RenderedThread) -> String {
        let mut output = String::new();
        let post = &thread.post;

        output.push_str(&format!("#### {}\n\n", post.title));
        output.push_str(&format!("*Posted by {}*\n\n", post.author));
        output.push_str(&emphasize(&post.content, post.removed));
        output.push_str("\n\n");

        for comment in &thread.comments {
            output.push_str(&render_comment(comment));
        }
        if !thread.comments.is_empty() {
            output.push('\n');
        }
        output.push_str("---\n\n");
        output
    }
}

/// Render a comment as a nested list item
fn render_comment(comment: &RenderedComment) -> String {
    let indent = "  ".repeat(comment.indent_level.saturating_sub(1));
    let body_indent = format!("{}  ", indent);
    let body = emphasize(&comment.content, comment.removed).replace('\n', &format!("\n{}", body_indent));

    format!(
        "{indent}- **{author}** • step {step}\n{body_indent}{body}\n",
        indent = indent,
        author = comment.author,
        step = comment.step,
        body_indent = body_indent,
        body = body,
    )
}

fn emphasize(content: &str, removed: bool) -> String {
    if removed {
        format!("*{}*", content.trim())
    } else {
        content.to_string()
    }
}

impl Default for MarkdownExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for MarkdownExporter {
    fn export(&self, doc: &RenderDocument) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.render_header(doc));
        for view in &doc.views {
            output.push_str(&self.render_view(view));
        }

        Ok(output)
    }

    fn format_name(&self) -> &str {
        "markdown"
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures::sample_document;

    #[test]
    fn test_markdown_exporter_creation() {
        let exporter = MarkdownExporter::new();
        assert_eq!(exporter.format_name(), "markdown");
        assert_eq!(exporter.file_extension(), "md");
    }

    #[test]
    fn test_markdown_headings() {
        let md = MarkdownExporter::new().export(&sample_document()).unwrap();
        assert!(md.starts_with("# Simulated Reddit\n"));
        assert!(md.contains("**Subreddit:** All"));
        assert!(md.contains("## Unmoderated view"));
        assert!(md.contains("## Moderated view (ToxiMuncher Lite)"));
        assert!(md.contains("#### Post 1 in r/cats"));
        assert!(md.contains("#### Post 2 in r/dogs"));
        assert!(md.contains("*Posted by User 10*"));
    }

    #[test]
    fn test_markdown_nesting() {
        let md = MarkdownExporter::new().export(&sample_document()).unwrap();
        assert!(md.contains("\n- **User 20** • step 1\n  comment 2\n"));
        assert!(md.contains("\n  - **User 30** • step 2\n"));
        // depth 5 is drawn at the depth 4 level
        assert!(md.contains("\n      - **User 60** • step 5\n"));
    }

    #[test]
    fn test_markdown_removed_comment() {
        let md = MarkdownExporter::new().export(&sample_document()).unwrap();
        assert!(md.contains("*Removed by moderator*"));
        assert!(md.contains("**Removed:** 1"));
    }

    #[test]
    fn test_markdown_without_stats() {
        let md = MarkdownExporter::new()
            .with_stats(false)
            .export(&sample_document())
            .unwrap();
        assert!(!md.contains("**Threads:**"));
    }

    #[test]
    fn test_multiline_body_stays_in_list_item() {
        let comment = RenderedComment {
            comment_id: 9.into(),
            parent_id: Some(1.into()),
            author: "User 1".to_string(),
            step: 3,
            depth: 2,
            indent_level: 2,
            content: "first\nsecond".to_string(),
            removed: false,
        };
        assert_eq!(
            render_comment(&comment),
            "  - **User 1** • step 3\n    first\n    second\n"
        );
    }
}
