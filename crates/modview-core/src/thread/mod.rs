//! Thread assembly module
//!
//! Rebuilds the reply tree of one conversation from its flat records and
//! produces a depth-tagged display order.

mod assembler;

pub use assembler::{assemble_thread, ThreadEntry};
