//! Skraper: a configurable web crawler and content extractor
//!
//! This crate walks hyperlinks from a seed URL within depth and page budgets,
//! extracts structured records (tags, media, metadata, tables) from pages, and
//! serializes the accumulated records to JSON, CSV or XLSX.

pub mod config;
pub mod crawler;
pub mod document;
pub mod driver;
pub mod extract;
pub mod output;
pub mod url;

use thiserror::Error;

pub use crawler::FetchError;
pub use output::OutputError;

/// Main error type for Skraper operations
#[derive(Debug, Error)]
pub enum SkraperError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No target URL set")]
    NoTarget,
}

/// Configuration-specific errors
///
/// These cover the TOML file, CLI combinations and the command script. All of
/// them are raised before any network activity begins.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unknown output format '{0}' (expected json, csv or xlsx)")]
    UnknownFormat(String),

    #[error("Unknown flag '{flag}' on script line {line}")]
    UnknownFlag { line: usize, flag: String },

    #[error("Flag '{flag}' on script line {line} requires an argument")]
    MissingArgument { line: usize, flag: String },

    #[error("Script line {line}: {message}")]
    Script { line: usize, message: String },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Skraper operations
pub type Result<T> = std::result::Result<T, SkraperError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Fetcher, Scheduler, VisitedSet};
pub use document::{Document, Element};
pub use extract::{Extraction, Record, ResultSet};
pub use output::{OutputFormat, OutputTarget};
pub use url::{normalize_url, resolve_link, site_name};
