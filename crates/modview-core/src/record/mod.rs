//! Record store module
//!
//! Holds the loaded comment records and answers category and thread queries.

pub mod model;
pub mod parity;
pub mod store;

pub use model::{CommentRecord, Dataset, DEFAULT_MODERATION_MESSAGE};
pub use parity::{FieldMismatch, ParityReport};
pub use store::{list_thread_ids, records_for_thread, subreddits, RecordStore, RecordView};
