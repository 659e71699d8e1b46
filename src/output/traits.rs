//! Serializer trait and error types
//!
//! This module defines the trait interface for the format-specific writers
//! and the errors they share.

use crate::extract::ResultSet;
use crate::output::OutputFormat;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for format-specific writers
///
/// Serializers are pure: the same result set always renders to the same
/// bytes, and the result set is never modified.
pub trait RecordSerializer {
    /// The format this serializer produces
    fn format(&self) -> OutputFormat;

    /// Renders `results` to bytes
    ///
    /// # Arguments
    ///
    /// * `results` - The records to render, in order
    fn serialize(&self, results: &ResultSet) -> OutputResult<Vec<u8>>;
}
