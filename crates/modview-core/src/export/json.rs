//! JSON exporter for rendered views

use super::exporter::Exporter;
use crate::error::Result;
use crate::view::RenderDocument;
use serde::Serialize;

/// Version of the JSON layout, bumped on incompatible changes
pub const EXPORT_SCHEMA_VERSION: &str = "1.0";

/// Pretty-printed JSON exporter
pub struct JsonExporter;

impl JsonExporter {
    /// Create a new JSON exporter
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct ExportEnvelope<'a> {
    schema_version: &'static str,
    #[serde(flatten)]
    document: &'a RenderDocument,
}

impl Exporter for JsonExporter {
    fn export(&self, doc: &RenderDocument) -> Result<String> {
        let envelope = ExportEnvelope {
            schema_version: EXPORT_SCHEMA_VERSION,
            document: doc,
        };
        Ok(serde_json::to_string_pretty(&envelope)?)
    }

    fn format_name(&self) -> &str {
        "json"
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
