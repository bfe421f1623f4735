//! CSV loading for the unmoderated and moderated datasets

use modview_core::error::{ModviewError, Result};
use modview_core::record::{CommentRecord, Dataset, ParityReport, RecordStore};
use modview_core::types::{AuthorId, CommentId, ThreadId, ViewMode};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Columns every dataset must carry
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "comment_id",
    "thread_id",
    "parent_id",
    "step",
    "author_id",
    "subreddit",
    "text",
];

/// One CSV row before type conversion
#[derive(Debug, Deserialize)]
struct RawRow {
    comment_id: String,
    thread_id: String,
    #[serde(default)]
    parent_id: Option<String>,
    step: String,
    author_id: String,
    #[serde(default)]
    subreddit: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    flagged: Option<String>,
    #[serde(default)]
    moderation_message: Option<String>,
}

/// Loads comment datasets from CSV files
pub struct CsvDatasetLoader {
    unmoderated_path: PathBuf,
    moderated_path: PathBuf,
    strict_parity: bool,
}

impl CsvDatasetLoader {
    /// Create a loader for the two dataset files
    pub fn new(unmoderated: impl Into<PathBuf>, moderated: impl Into<PathBuf>) -> Self {
        Self {
            unmoderated_path: unmoderated.into(),
            moderated_path: moderated.into(),
            strict_parity: false,
        }
    }

    /// Fail the load when the datasets differ in structure
    pub fn with_strict_parity(mut self, strict: bool) -> Self {
        self.strict_parity = strict;
        self
    }

    /// Load both datasets into a store, returning the parity report alongside
    pub fn load(&self) -> Result<(RecordStore, ParityReport)> {
        let unmoderated = load_dataset(&self.unmoderated_path, ViewMode::Unmoderated)?;
        let moderated = load_dataset(&self.moderated_path, ViewMode::Moderated)?;
        let store = RecordStore::new(unmoderated, moderated)?;

        let report = store.parity();
        if !report.is_clean() {
            report.log_warnings();
            if self.strict_parity {
                return Err(ModviewError::ParityMismatch(report.summary()));
            }
        }

        Ok((store, report))
    }
}

/// Load one dataset from a CSV file
pub fn load_dataset(path: &Path, mode: ViewMode) -> Result<Dataset> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ModviewError::FileNotFound(path.to_path_buf())
        } else {
            ModviewError::Io(e)
        }
    })?;

    let dataset = read_dataset(file, mode, &path.display().to_string())?;
    info!(
        "Loaded {} {} records from {:?}",
        dataset.len(),
        mode,
        path
    );
    Ok(dataset)
}

/// Read one dataset from any CSV source; `name` is used in error messages
pub fn read_dataset<R: Read>(reader: R, mode: ViewMode, name: &str) -> Result<Dataset> {
    // Text cells are kept verbatim; numeric and boolean cells are trimmed when parsed.
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| ModviewError::Csv(format!("{}: {}", name, e)))?
        .clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(ModviewError::MissingColumn {
                dataset: name.to_string(),
                column: column.to_string(),
            });
        }
    }
    if mode == ViewMode::Moderated {
        for column in ["flagged", "moderation_message"] {
            if !headers.iter().any(|h| h == column) {
                debug!("{}: no '{}' column, using defaults", name, column);
            }
        }
    }

    let mut records = Vec::new();
    for (index, row) in csv_reader.deserialize::<RawRow>().enumerate() {
        let row_number = index + 1;
        let raw = row.map_err(|e| ModviewError::Csv(format!("{}: row {}: {}", name, row_number, e)))?;
        let parser = FieldParser {
            dataset: name,
            row: row_number,
        };
        records.push(parser.record(raw, mode)?);
    }

    Dataset::new(mode, records).map_err(|e| match e {
        ModviewError::DuplicateCommentId { comment_id, .. } => ModviewError::DuplicateCommentId {
            dataset: name.to_string(),
            comment_id,
        },
        other => other,
    })
}

/// Converts raw cells, reporting where a bad value sits
struct FieldParser<'a> {
    dataset: &'a str,
    row: usize,
}

impl FieldParser<'_> {
    fn record(&self, raw: RawRow, mode: ViewMode) -> Result<CommentRecord> {
        let (flagged, moderation_message) = match mode {
            ViewMode::Unmoderated => (false, None),
            ViewMode::Moderated => (
                self.flag(raw.flagged.as_deref())?,
                raw.moderation_message.filter(|m| !m.trim().is_empty()),
            ),
        };

        Ok(CommentRecord {
            comment_id: CommentId(self.integer("comment_id", &raw.comment_id)?),
            thread_id: ThreadId(self.integer("thread_id", &raw.thread_id)?),
            parent_id: self.parent(raw.parent_id.as_deref())?,
            step: self.integer("step", &raw.step)?,
            author_id: AuthorId(self.integer("author_id", &raw.author_id)?),
            subreddit: raw.subreddit,
            text: raw.text,
            flagged,
            moderation_message,
        })
    }

    fn integer(&self, column: &str, value: &str) -> Result<i64> {
        parse_integer(value).ok_or_else(|| self.malformed(column, value, "integer"))
    }

    fn parent(&self, value: Option<&str>) -> Result<Option<CommentId>> {
        match value.map(str::trim) {
            None => Ok(None),
            Some(v) if is_missing(v) => Ok(None),
            Some(v) => parse_integer(v)
                .map(|id| Some(CommentId(id)))
                .ok_or_else(|| self.malformed("parent_id", v, "integer")),
        }
    }

    fn flag(&self, value: Option<&str>) -> Result<bool> {
        match value {
            None => Ok(false),
            Some(v) => parse_bool(v).ok_or_else(|| self.malformed("flagged", v, "boolean")),
        }
    }

    fn malformed(&self, column: &str, value: &str, expected: &'static str) -> ModviewError {
        ModviewError::MalformedField {
            dataset: self.dataset.to_string(),
            row: self.row,
            column: column.to_string(),
            value: value.to_string(),
            expected,
        }
    }
}

/// Parse an integer cell, accepting a zero fractional part ("3.0")
pub fn parse_integer(value: &str) -> Option<i64> {
    let value = value.trim();
    if let Ok(n) = value.parse::<i64>() {
        return Some(n);
    }
    let (whole, fraction) = value.split_once('.')?;
    if fraction.is_empty() || !fraction.bytes().all(|b| b == b'0') {
        return None;
    }
    whole.parse::<i64>().ok()
}

/// Parse a boolean cell; an empty cell is false
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "0" | "0.0" | "no" => Some(false),
        "true" | "1" | "1.0" | "yes" => Some(true),
        _ => None,
    }
}

fn is_missing(value: &str) -> bool {
    value.is_empty()
        || ["nan", "none", "null"]
            .iter()
            .any(|m| value.eq_ignore_ascii_case(m))
}
