//! Command-line flags
//!
//! The same [`Cli`] parses the process arguments and every command-script
//! line, so a flag means exactly the same thing in both places.

use crate::config::ConfigOverrides;
use crate::driver::command::{parse_target, split_tags, Command};
use crate::extract::Extraction;
use crate::output::OutputFormat;
use crate::ConfigError;
use clap::Parser;
use std::path::PathBuf;

/// Skraper: a configurable web crawler and content extractor
///
/// Fetches a target page, optionally crawls the links it finds within depth
/// and page limits, extracts tags, media, metadata and tables, and writes the
/// results as JSON, CSV or XLSX.
#[derive(Parser, Debug, Clone)]
#[command(name = "skraper")]
#[command(version)]
#[command(about = "A configurable web crawler and content extractor", long_about = None)]
pub struct Cli {
    /// Target URL
    #[arg(value_name = "URL", conflicts_with = "url")]
    pub target: Option<String>,

    /// Target URL (alternative to the positional argument)
    #[arg(short = 'u', long = "url", value_name = "URL")]
    pub url: Option<String>,

    /// Crawl links starting from the target
    #[arg(long)]
    pub crawl: bool,

    /// Maximum crawl depth (0 = target only)
    #[arg(long, value_name = "N")]
    pub depth: Option<u32>,

    /// Maximum number of pages to visit while crawling
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Extract the text of these tags (space or comma separated)
    #[arg(long, value_name = "TAG", num_args = 1..)]
    pub extract: Vec<String>,

    /// Extract image sources
    #[arg(long)]
    pub extract_images: bool,

    /// Extract video sources
    #[arg(long)]
    pub extract_video: bool,

    /// Extract audio sources
    #[arg(long)]
    pub extract_audio: bool,

    /// Extract meta name/content pairs
    #[arg(long)]
    pub extract_meta: bool,

    /// Extract table rows
    #[arg(long)]
    pub extract_table: bool,

    /// Download every image on the target page
    #[arg(long)]
    pub download_images: bool,

    /// Download every video on the target page
    #[arg(long)]
    pub download_videos: bool,

    /// Directory for downloaded media
    #[arg(long, value_name = "DIR")]
    pub media_dir: Option<PathBuf>,

    /// Save the target page's raw HTML
    #[arg(long)]
    pub store_html: bool,

    /// Search the target page's text (case-insensitive regex)
    #[arg(long, value_name = "PATTERN")]
    pub search: Option<String>,

    /// Write results in this format (json, csv, xlsx)
    #[arg(long, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,

    /// Root directory for output files
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Logical output file name
    #[arg(long, value_name = "NAME")]
    pub file_name: Option<String>,

    /// User-Agent header to send
    #[arg(long, value_name = "AGENT")]
    pub user_agent: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Accepted for compatibility; robots.txt is never consulted
    #[arg(long)]
    pub ignore_robots: bool,

    /// Path to TOML configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run commands from a script file before the command-line ones
    #[arg(long = "mc", value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Settings flags, to be layered over the loaded configuration
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            max_depth: self.depth,
            page_limit: self.limit,
            user_agent: self.user_agent.clone(),
            timeout_secs: self.timeout,
            ignore_robots: self.ignore_robots,
            output_dir: self.output_dir.clone(),
            file_name: self.file_name.clone(),
            media_dir: self.media_dir.clone(),
        }
    }

    /// Translates the action flags into session commands
    ///
    /// Extraction flags combined with `--crawl` run on every crawled page
    /// instead of once on the target. Output is always written last, whatever
    /// order the flags were given in.
    pub fn commands(&self) -> Result<Vec<Command>, ConfigError> {
        let mut commands = Vec::new();

        if let Some(url) = self.target.as_ref().or(self.url.as_ref()) {
            commands.push(Command::SetUrl(parse_target(url)?));
        }

        let extractions = self.extractions();
        if self.crawl {
            commands.push(Command::Crawl {
                extract: extractions,
            });
        } else {
            commands.extend(extractions.into_iter().map(Command::Extract));
        }

        if self.store_html {
            commands.push(Command::StoreHtml);
        }
        if let Some(pattern) = &self.search {
            commands.push(Command::Search(pattern.clone()));
        }
        if self.download_images {
            commands.push(Command::DownloadImages);
        }
        if self.download_videos {
            commands.push(Command::DownloadVideos);
        }
        if let Some(format) = self.output {
            commands.push(Command::Output(format));
        }

        Ok(commands)
    }

    /// Commands for one script line: settings first, then the actions
    ///
    /// Settings given on a script line stay in force for the lines after it.
    pub fn script_commands(&self, line: usize) -> Result<Vec<Command>, ConfigError> {
        if self.config.is_some() || self.script.is_some() {
            return Err(ConfigError::Script {
                line,
                message: "--config and --mc are only accepted on the command line".to_string(),
            });
        }

        let mut commands = Vec::new();

        let overrides = self.overrides();
        if !overrides.is_empty() {
            commands.push(Command::Configure(overrides));
        }
        commands.extend(self.commands()?);

        Ok(commands)
    }

    fn extractions(&self) -> Vec<Extraction> {
        let mut extractions = Vec::new();

        let tags: Vec<String> = self.extract.iter().flat_map(|t| split_tags(t)).collect();
        if !tags.is_empty() {
            extractions.push(Extraction::Tags(tags));
        }
        if self.extract_images {
            extractions.push(Extraction::Images);
        }
        if self.extract_video {
            extractions.push(Extraction::Video);
        }
        if self.extract_audio {
            extractions.push(Extraction::Audio);
        }
        if self.extract_meta {
            extractions.push(Extraction::Meta);
        }
        if self.extract_table {
            extractions.push(Extraction::Tables);
        }

        extractions
    }
}
