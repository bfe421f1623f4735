//! Export functionality for rendered views
//!
//! This module provides exporters for writing a [`RenderDocument`] out in
//! various formats.
//!
//! # Overview
//!
//! Export functionality supports:
//! - HTML (standalone page with depth-indented comment blocks)
//! - Markdown (headings per view and post, nested quotes for replies)
//! - JSON (the render instructions as-is)
//! - Plain text (indented, for terminals)
//!
//! # Example
//!
//! ```ignore
//! use modview_core::export::ExportManager;
//!
//! let manager = ExportManager::new();
//! let html = manager.export(&doc, "html")?;
//! ```
//!
//! [`RenderDocument`]: crate::view::RenderDocument

mod exporter;
mod html;
mod json;
mod markdown;
mod text;

pub use exporter::{ExportManager, Exporter};
pub use html::HtmlExporter;
pub use json::{JsonExporter, EXPORT_SCHEMA_VERSION};
pub use markdown::MarkdownExporter;
pub use text::TextExporter;
