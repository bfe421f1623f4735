//! Standalone HTML page exporter

use super::exporter::Exporter;
use crate::error::Result;
use crate::view::{PostHeader, RenderDocument, RenderedComment, RenderedThread, RenderedView};
use std::fmt::Write;

/// Horizontal offset per indentation level, in pixels
pub const DEFAULT_INDENT_PX: usize = 18;

const BASE_STYLE: &str = r#"
body { background-color: #dae0e6; font-family: sans-serif; margin: 24px; }
.subtitle { color: #555; font-size: 0.9rem; }
.tab-label { font-size: 0.8rem; text-transform: uppercase; color: #777; margin-top: 32px; }
.post-block {
    background-color: #ffffff;
    padding: 12px;
    border-radius: 4px;
    margin-bottom: 8px;
    border: 1px solid #ccc;
}
.post-title { font-weight: 600; font-size: 1.1rem; margin-bottom: 4px; }
.post-body { margin-top: 6px; font-size: 0.9rem; }
.comment {
    background-color: #ffffff;
    border-radius: 4px;
    padding: 8px;
    margin-top: 2px;
    border-left: 3px solid #bbb;
    font-size: 0.9rem;
}
.comment-removed {
    background-color: #f8f8f8;
    border-radius: 4px;
    padding: 8px;
    margin-top: 2px;
    border-left: 3px solid #ff4500;
    font-size: 0.9rem;
    color: #555;
    font-style: italic;
}
.meta { font-size: 0.75rem; color: #555; margin-bottom: 3px; }
"#;

/// HTML exporter producing a single self-contained page
pub struct HtmlExporter {
    indent_px: usize,
}

impl HtmlExporter {
    /// Create a new HTML exporter with default settings
    pub fn new() -> Self {
        Self {
            indent_px: DEFAULT_INDENT_PX,
        }
    }

    /// Set the horizontal offset per indentation level
    pub fn with_indent_px(mut self, indent_px: usize) -> Self {
        self.indent_px = indent_px;
        self
    }

    /// Only levels that occur in the document get a rule.
    fn render_style(&self, doc: &RenderDocument) -> String {
        let mut style = String::from(BASE_STYLE);
        for level in 0..=deepest_level(doc) {
            let _ = writeln!(
                style,
                ".depth-{} {{ margin-left: {}px; }}",
                level,
                level.saturating_mul(self.indent_px)
            );
        }
        style
    }

    fn render_view(&self, view: &RenderedView) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "<section class=\"view view-{}\">",
            view.mode.as_str()
        );
        let _ = writeln!(out, "<div class=\"tab-label\">{}</div>", escape(&view.tab_label));
        let _ = writeln!(out, "<h3>{}</h3>", escape(&view.heading));
        for thread in &view.threads {
            out.push_str(&self.render_thread(thread));
        }
        out.push_str("</section>\n");
        out
    }

    fn render_thread(&self, thread: &RenderedThread) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "<article class=\"thread\" id=\"thread-{}\">", thread.thread_id);
        out.push_str(&render_post(&thread.post));
        for comment in &thread.comments {
            out.push_str(&render_comment(comment));
        }
        out.push_str("</article>\n");
        out
    }
}

impl Default for HtmlExporter {
    fn default() -> Self {
        Self::new()
    }
}

fn deepest_level(doc: &RenderDocument) -> usize {
    doc.views
        .iter()
        .flat_map(|view| &view.threads)
        .flat_map(|thread| &thread.comments)
        .map(|comment| comment.indent_level)
        .max()
        .unwrap_or(0)
        .min(doc.max_indent_depth)
}

fn render_post(post: &PostHeader) -> String {
    let body_class = if post.removed {
        "post-body comment-removed"
    } else {
        "post-body"
    };
    format!(
        concat!(
            "<div class=\"post-block\">\n",
            "  <div class=\"post-title\">{title}</div>\n",
            "  <div class=\"meta\">Posted by {author}</div>\n",
            "  <div class=\"{body_class}\">{content}</div>\n",
            "</div>\n"
        ),
        title = escape(&post.title),
        author = escape(&post.author),
        body_class = body_class,
        content = escape(&post.content),
    )
}

fn render_comment(comment: &RenderedComment) -> String {
    let class = if comment.removed {
        "comment-removed"
    } else {
        "comment"
    };
    format!(
        concat!(
            "<div class=\"{class} depth-{level}\" id=\"c{id}\">\n",
            "  <div class=\"meta\">{meta}</div>\n",
            "  <div>{content}</div>\n",
            "</div>\n"
        ),
        class = class,
        level = comment.indent_level,
        id = comment.comment_id,
        meta = escape(&comment.meta()),
        content = escape(&comment.content),
    )
}

/// Escape text for use in HTML element content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

impl Exporter for HtmlExporter {
    fn export(&self, doc: &RenderDocument) -> Result<String> {
        let mut out = String::new();

        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        out.push_str("<meta charset=\"utf-8\">\n");
        let _ = writeln!(out, "<title>{}</title>", escape(&doc.title));
        let _ = writeln!(
            out,
            "<meta name=\"generator\" content=\"modview\" data-generated-at=\"{}\">",
            doc.generated_at.to_rfc3339()
        );
        let _ = writeln!(out, "<style>{}</style>", self.render_style(doc));
        out.push_str("</head>\n<body>\n");

        let _ = writeln!(out, "<h1>{}</h1>", escape(&doc.title));
        let _ = writeln!(out, "<p class=\"subtitle\">{}</p>", escape(&doc.subtitle));
        let _ = writeln!(
            out,
            "<p class=\"meta\">Subreddit: {}</p>",
            escape(doc.category.label())
        );

        for view in &doc.views {
            out.push_str(&self.render_view(view));
        }

        out.push_str("</body>\n</html>\n");
        Ok(out)
    }

    fn format_name(&self) -> &str {
        "html"
    }

    fn file_extension(&self) -> &str {
        "html"
    }
}
