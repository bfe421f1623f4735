//! modview-storage - Dataset loading for modview
//!
//! This crate reads the unmoderated and moderated comment datasets from CSV
//! files and hands back an immutable record store.

mod csv_loader;

pub use csv_loader::{
    load_dataset, parse_bool, parse_integer, read_dataset, CsvDatasetLoader, REQUIRED_COLUMNS,
};
