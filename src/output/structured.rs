//! Structured-text (JSON) writer

use crate::extract::ResultSet;
use crate::output::traits::{OutputResult, RecordSerializer};
use crate::output::OutputFormat;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Writes the result set as a pretty-printed JSON array, one object per record
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSerializer;

impl RecordSerializer for JsonSerializer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Json
    }

    fn serialize(&self, results: &ResultSet) -> OutputResult<Vec<u8>> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        results.serialize(&mut serializer)?;
        Ok(buffer)
    }
}
