//! Output module for serializing and storing extracted data
//!
//! This module handles:
//! - Rendering a result set as JSON, CSV or XLSX
//! - Deriving the deterministic on-disk location of an output file
//! - Writing the rendered bytes, creating directories as needed

mod delimited;
mod spreadsheet;
mod structured;
mod traits;

pub use delimited::CsvSerializer;
pub use spreadsheet::XlsxSerializer;
pub use structured::JsonSerializer;
pub use traits::{OutputError, OutputResult, RecordSerializer};

use crate::extract::ResultSet;
use crate::ConfigError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Directory under each site that holds extracted data
pub const EXTRACTED_DATA_DIR: &str = ".extracted_data";

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Structured text
    Json,
    /// Delimited text
    Csv,
    /// Spreadsheet
    Xlsx,
}

impl OutputFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }

    /// The serializer producing this format
    pub fn serializer(&self) -> Box<dyn RecordSerializer> {
        match self {
            Self::Json => Box::new(JsonSerializer),
            Self::Csv => Box::new(CsvSerializer),
            Self::Xlsx => Box::new(XlsxSerializer),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "xlsx" => Ok(Self::Xlsx),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Where one output request lands on disk
///
/// The path is `<output_dir>/<site_name>/.extracted_data/<md5(file_name)>.<ext>`,
/// so the same site and file name always map to the same file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub format: OutputFormat,
    pub output_dir: PathBuf,
    pub site_name: String,
    pub file_name: String,
}

impl OutputTarget {
    /// Directory holding the site's extracted data
    pub fn directory(&self) -> PathBuf {
        self.output_dir
            .join(&self.site_name)
            .join(EXTRACTED_DATA_DIR)
    }

    /// Full path of the output file
    ///
    /// # Example
    ///
    /// ```
    /// use skraper::output::{OutputFormat, OutputTarget};
    /// use std::path::PathBuf;
    ///
    /// let target = OutputTarget {
    ///     format: OutputFormat::Json,
    ///     output_dir: PathBuf::from("out"),
    ///     site_name: "example.com".to_string(),
    ///     file_name: "output".to_string(),
    /// };
    /// assert_eq!(
    ///     target.path(),
    ///     PathBuf::from("out/example.com/.extracted_data/78e6221f6393d1356681db398f14ce6d.json")
    /// );
    /// ```
    pub fn path(&self) -> PathBuf {
        self.path_with_extension(self.format.extension())
    }

    /// Same location as [`OutputTarget::path`] with another extension
    pub fn path_with_extension(&self, extension: &str) -> PathBuf {
        self.directory()
            .join(format!("{}.{}", hashed_file_name(&self.file_name), extension))
    }
}

/// Content-addressed token for a logical file name
pub fn hashed_file_name(file_name: &str) -> String {
    format!("{:x}", md5::compute(file_name.as_bytes()))
}

/// Renders a result set in the given format
pub fn serialize(format: OutputFormat, results: &ResultSet) -> OutputResult<Vec<u8>> {
    format.serializer().serialize(results)
}

/// Serializes `results` and writes them to the target's path
///
/// # Returns
///
/// * `Ok(PathBuf)` - The file that was written
/// * `Err(OutputError)` - Serialization or the write failed; `results` is untouched
pub fn write_output(results: &ResultSet, target: &OutputTarget) -> OutputResult<PathBuf> {
    let bytes = serialize(target.format, results)?;
    let path = target.path();
    write_file(&path, &bytes)?;
    tracing::info!("Data saved to: {}", path.display());
    Ok(path)
}

/// Writes bytes to `path`, creating parent directories first
pub fn write_file(path: &Path, bytes: &[u8]) -> OutputResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}
