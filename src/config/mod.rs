//! Configuration module for Skraper
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Command-line flags are layered on top by the binary and
//! the merged result is validated again with [`validate`].
//!
//! # Example
//!
//! ```no_run
//! use skraper::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("skraper.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod overrides;
mod parser;
mod types;
mod validation;

// Re-export types
pub use overrides::ConfigOverrides;
pub use types::{Config, CrawlerConfig, HttpConfig, OutputConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, parse_config, read_config_with_hash};
pub use validation::validate;
