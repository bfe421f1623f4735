//! View building module
//!
//! Combines the record store and the thread assembler into render
//! instructions for the unmoderated and moderated views.
//!
//! # Example
//!
//! ```ignore
//! use modview_core::view::ViewBuilder;
//! use modview_core::{Category, ViewMode};
//!
//! let builder = ViewBuilder::new();
//! let doc = builder.build_document(&store, &Category::All, &ViewMode::ALL);
//! ```

mod builder;
mod model;

pub use builder::{ViewBuilder, DEFAULT_MAX_INDENT_DEPTH, MAX_INDENT_DEPTH_LIMIT};
pub use model::{PostHeader, RenderDocument, RenderedComment, RenderedThread, RenderedView};
