//! Plain text exporter

use super::exporter::Exporter;
use crate::error::Result;
use crate::view::{RenderDocument, RenderedThread};

/// Indented plain text, two spaces per level
pub struct TextExporter;

impl TextExporter {
    /// Create a new plain-text exporter
    pub fn new() -> Self {
        Self
    }

    fn render_thread(&self, thread: &RenderedThread, out: &mut String) {
        let post = &thread.post;
        out.push_str(&format!("{}\n", post.title));
        out.push_str(&format!("Posted by {}\n", post.author));
        out.push_str(&marked(&post.content, post.removed));
        out.push('\n');

        for comment in &thread.comments {
            let indent = "  ".repeat(comment.indent_level);
            out.push_str(&format!("{}{}\n", indent, comment.meta()));
            for line in marked(&comment.content, comment.removed).lines() {
                out.push_str(&format!("{}  {}\n", indent, line));
            }
        }
        out.push('\n');
    }
}

impl Default for TextExporter {
    fn default() -> Self {
        Self::new()
    }
}

fn marked(content: &str, removed: bool) -> String {
    if removed {
        format!("[removed] {}", content)
    } else {
        content.to_string()
    }
}

impl Exporter for TextExporter {
    fn export(&self, doc: &RenderDocument) -> Result<String> {
        let mut out = String::new();
        out.push_str(&format!("{}\n", doc.title));
        out.push_str(&format!("Subreddit: {}\n\n", doc.category));

        for view in &doc.views {
            out.push_str(&format!("== {} ==\n", view.heading));
            out.push('\n');
            for thread in &view.threads {
                self.render_thread(thread, &mut out);
            }
        }

        Ok(out)
    }

    fn format_name(&self) -> &str {
        "text"
    }

    fn file_extension(&self) -> &str {
        "txt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures::sample_document;

    #[test]
    fn test_text_layout() {
        let text = TextExporter::new().export(&sample_document()).unwrap();
        assert!(text.contains("== Original conversations (no moderator) ==\n"));
        assert!(text.contains("Post 1 in r/cats\nPosted by User 10\n"));
        assert!(text.contains("\n  User 20 • step 1\n    comment 2\n"));
        assert!(text.contains("\n        User 60 • step 5\n          comment 6\n"));
    }

    #[test]
    fn test_text_marks_removed() {
        let text = TextExporter::new().export(&sample_document()).unwrap();
        assert!(text.contains("[removed] Removed by moderator"));
    }
}
