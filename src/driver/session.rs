//! Session state and command execution
//!
//! A [`Session`] owns the active target URL and the result set accumulated
//! across commands. Commands run strictly in order; one that fails is logged
//! and the session moves on to the next.

use crate::config::{validate, Config, ConfigOverrides};
use crate::crawler::{Fetcher, Scheduler};
use crate::document::Document;
use crate::driver::command::Command;
use crate::extract::{extract_images, extract_video, Extraction, Record, ResultSet};
use crate::output::{hashed_file_name, write_file, write_output, OutputFormat, OutputTarget};
use crate::url::{resolve_link, site_name};
use crate::{Result, SkraperError};
use regex::RegexBuilder;
use std::path::PathBuf;
use url::Url;

/// Site directory used when the target has no usable host
const UNKNOWN_SITE: &str = "unknown";

/// A scraping session
pub struct Session {
    fetcher: Fetcher,
    config: Config,
    target: Option<Url>,
    results: ResultSet,
}

impl Session {
    /// Creates a session with no target and an empty result set
    ///
    /// # Arguments
    ///
    /// * `config` - Validated configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Session)` - Ready to run commands
    /// * `Err(SkraperError)` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = Fetcher::new(&config.http)?;

        Ok(Self {
            fetcher,
            config,
            target: None,
            results: ResultSet::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn target(&self) -> Option<&Url> {
        self.target.as_ref()
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn into_results(self) -> ResultSet {
        self.results
    }

    /// Runs `commands` in order, logging and skipping any that fail
    ///
    /// # Returns
    ///
    /// The number of commands that failed
    pub async fn run(&mut self, commands: &[Command]) -> usize {
        let mut failures = 0;

        for command in commands {
            tracing::debug!("Running command: {}", command);
            if let Err(e) = self.execute(command).await {
                tracing::error!("Command '{}' failed: {}", command, e);
                failures += 1;
            }
        }

        failures
    }

    /// Executes a single command against the session
    pub async fn execute(&mut self, command: &Command) -> Result<()> {
        match command {
            Command::Configure(overrides) => self.configure(overrides),
            Command::SetUrl(url) => {
                tracing::info!("Target set to {}", url);
                self.target = Some(url.clone());
                Ok(())
            }
            Command::Crawl { extract } => self.crawl(extract).await,
            Command::Extract(extraction) => self.extract(extraction).await,
            Command::StoreHtml => self.store_html().await.map(|_| ()),
            Command::DownloadImages => {
                let sources = record_sources(extract_images(&self.fetch_target().await?));
                self.download_all(sources, "image").await;
                Ok(())
            }
            Command::DownloadVideos => {
                let sources = record_sources(extract_video(&self.fetch_target().await?));
                self.download_all(sources, "video").await;
                Ok(())
            }
            Command::Search(pattern) => self.search(pattern).await.map(|_| ()),
            Command::Output(format) => self.write(*format).map(|_| ()),
        }
    }

    /// Layers `overrides` over the session configuration
    ///
    /// The merged configuration is validated first; on failure the session
    /// keeps its previous settings.
    fn configure(&mut self, overrides: &ConfigOverrides) -> Result<()> {
        let mut config = self.config.clone();
        overrides.apply(&mut config);
        validate(&config)?;

        self.fetcher = Fetcher::new(&config.http)?;
        self.config = config;
        tracing::debug!("Settings updated: {:?}", overrides);
        Ok(())
    }

    async fn crawl(&mut self, extractions: &[Extraction]) -> Result<()> {
        let seed = self.require_target()?.clone();
        let scheduler = Scheduler::new(self.fetcher.clone(), self.config.crawler.clone());

        let mut records = Vec::new();
        let visited = scheduler
            .crawl_with(&seed, |url, document| {
                for extraction in extractions {
                    let found = extraction.apply(document);
                    tracing::debug!("{} on {}: {} records", extraction, url, found.len());
                    records.extend(found);
                }
            })
            .await;

        for url in visited.iter() {
            tracing::info!("Visited: {}", url);
        }
        records.iter().for_each(log_record);
        self.results.append(records);

        Ok(())
    }

    async fn extract(&mut self, extraction: &Extraction) -> Result<()> {
        let document = self.fetch_target().await?;
        let records = extraction.apply(&document);

        if records.is_empty() {
            tracing::info!("No results for {}", extraction);
        }
        records.iter().for_each(log_record);
        self.results.append(records);

        Ok(())
    }

    /// Saves the target's raw HTML beside the extracted data
    ///
    /// # Returns
    ///
    /// * `Ok(PathBuf)` - The file written
    pub async fn store_html(&self) -> Result<PathBuf> {
        let target = self.require_target()?;
        let body = self.fetcher.fetch(target).await?;

        // The format only picks the default extension, which is overridden here
        let path = self
            .output_target(OutputFormat::Json)?
            .path_with_extension("html");
        write_file(&path, &body)?;

        tracing::info!("HTML saved to: {}", path.display());
        Ok(path)
    }

    /// Searches the target page's visible text
    ///
    /// The pattern is a case-insensitive regular expression; if it does not
    /// compile it is matched as literal text instead.
    pub async fn search(&self, pattern: &str) -> Result<bool> {
        let document = self.fetch_target().await?;
        let found = text_matches(&document.text(), pattern);

        if found {
            tracing::info!("Found text: {}", pattern);
        } else {
            tracing::info!("Text not found: {}", pattern);
        }

        Ok(found)
    }

    /// Writes the accumulated results for the current target
    ///
    /// # Returns
    ///
    /// * `Ok(PathBuf)` - The file written
    /// * `Err(SkraperError)` - No target, or serialization/IO failed. The result
    ///   set is left as it was.
    pub fn write(&self, format: OutputFormat) -> Result<PathBuf> {
        let target = self.output_target(format)?;
        Ok(write_output(&self.results, &target)?)
    }

    fn output_target(&self, format: OutputFormat) -> Result<OutputTarget> {
        let url = self.require_target()?;
        let site = site_name(url).unwrap_or_else(|| UNKNOWN_SITE.to_string());

        Ok(OutputTarget {
            format,
            output_dir: self.config.output.output_dir.clone(),
            site_name: site,
            file_name: self.config.output.file_name.clone(),
        })
    }

    fn require_target(&self) -> Result<&Url> {
        self.target.as_ref().ok_or(SkraperError::NoTarget)
    }

    async fn fetch_target(&self) -> Result<Document> {
        let target = self.require_target()?;
        let body = self.fetcher.fetch(target).await?;
        Ok(Document::parse(&body))
    }

    /// Downloads each source into the media directory
    ///
    /// Individual failures are logged and do not stop the rest.
    async fn download_all(&self, sources: Vec<String>, kind: &str) -> usize {
        let Some(base) = self.target.clone() else {
            return 0;
        };

        let mut saved = 0;
        for src in sources {
            let Some(url) = resolve_link(&src, &base) else {
                tracing::warn!("Skipping {} with unusable source: {}", kind, src);
                continue;
            };

            match self.download(&url).await {
                Ok(path) => {
                    tracing::info!("Downloaded {}: {}", kind, path.display());
                    saved += 1;
                }
                Err(e) => tracing::warn!("Failed to download {} {}: {}", kind, url, e),
            }
        }

        tracing::info!("Downloaded {} {} file(s)", saved, kind);
        saved
    }

    async fn download(&self, url: &Url) -> Result<PathBuf> {
        let bytes = self.fetcher.fetch(url).await?;
        let path = self.config.output.media_dir.join(media_file_name(url));
        write_file(&path, &bytes)?;
        Ok(path)
    }
}

/// Case-insensitive regex match, falling back to a literal match
pub fn text_matches(text: &str, pattern: &str) -> bool {
    let regex = RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .or_else(|_| {
            RegexBuilder::new(&regex::escape(pattern))
                .case_insensitive(true)
                .build()
        });

    match regex {
        Ok(regex) => regex.is_match(text),
        Err(_) => text.contains(pattern),
    }
}

/// File name for a downloaded resource: its last path segment
///
/// URLs ending in `/` have no usable segment and get a hashed name instead.
pub fn media_file_name(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| hashed_file_name(url.as_str()))
}

fn record_sources(records: Vec<Record>) -> Vec<String> {
    records
        .into_iter()
        .filter_map(|record| match record {
            Record::Image { src } | Record::Video { src } | Record::Audio { src } => Some(src),
            _ => None,
        })
        .collect()
}

fn log_record(record: &Record) {
    tracing::info!("{}: {}", record.kind(), record.values().join(" | "));
}
