//! modview-core - Core library for modview
//!
//! This crate provides the core logic of the moderated forum viewer:
//! the record store, thread tree assembly, view building and export.

pub mod error;
pub mod types;
pub mod config;
pub mod record;
pub mod thread;
pub mod view;
pub mod export;

pub use error::{ModviewError, Result};
pub use types::*;
