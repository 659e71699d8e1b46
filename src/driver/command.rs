//! Commands and the command-script format
//!
//! A script is newline-delimited. Blank lines and lines starting with `//` are
//! ignored; every other line is split on whitespace and parsed by the same
//! [`Cli`] as the process arguments, then turned into commands the same way.
//! Settings flags on a line (`--depth`, `--limit`, `--file-name`, ...) stay in
//! force for the lines that follow, and `-u <url>` rebinds the target.
//!
//! ```text
//! // scrape the front page
//! -u https://example.com
//! --extract h1 h2
//! --extract-images --output json
//! ```

use crate::config::{validate, Config, ConfigOverrides};
use crate::driver::cli::Cli;
use crate::extract::Extraction;
use crate::output::OutputFormat;
use crate::url::normalize_url;
use crate::ConfigError;
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::Parser;
use std::fmt;
use url::Url;

/// One step of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Layer settings over the session configuration
    Configure(ConfigOverrides),

    /// Rebind the active target URL
    SetUrl(Url),

    /// Crawl from the target, running `extract` on every visited page
    Crawl { extract: Vec<Extraction> },

    /// Run one extraction pass on the target page
    Extract(Extraction),

    /// Save the target page's raw HTML
    StoreHtml,

    /// Download every image on the target page
    DownloadImages,

    /// Download every video on the target page
    DownloadVideos,

    /// Report whether the target page's text matches a pattern
    Search(String),

    /// Write the accumulated results
    Output(OutputFormat),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configure(_) => f.write_str("configure"),
            Self::SetUrl(url) => write!(f, "set url {}", url),
            Self::Crawl { extract } if extract.is_empty() => f.write_str("crawl"),
            Self::Crawl { extract } => {
                let passes: Vec<String> = extract.iter().map(ToString::to_string).collect();
                write!(f, "crawl + extract {}", passes.join(", "))
            }
            Self::Extract(extraction) => write!(f, "extract {}", extraction),
            Self::StoreHtml => f.write_str("store html"),
            Self::DownloadImages => f.write_str("download images"),
            Self::DownloadVideos => f.write_str("download videos"),
            Self::Search(term) => write!(f, "search '{}'", term),
            Self::Output(format) => write!(f, "output {}", format),
        }
    }
}

/// Parses a whole script
///
/// Every line is parsed before anything runs, so a bad line rejects the
/// script without any network activity.
pub fn parse_script(script: &str) -> Result<Vec<Command>, ConfigError> {
    let mut commands = Vec::new();

    for (index, line) in script.lines().enumerate() {
        commands.extend(parse_line(index + 1, line)?);
    }

    Ok(commands)
}

/// Parses one script line into commands
///
/// `line_no` is only used in error messages.
pub fn parse_line(line_no: usize, line: &str) -> Result<Vec<Command>, ConfigError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with("//") {
        return Ok(Vec::new());
    }

    let args = std::iter::once(env!("CARGO_PKG_NAME")).chain(trimmed.split_whitespace());
    let cli = Cli::try_parse_from(args).map_err(|e| script_error(line_no, e))?;
    cli.script_commands(line_no)
}

/// Checks that every setting change in `commands` leaves a valid configuration
///
/// Run before the session starts so bad script settings fail up front.
pub fn validate_commands(base: &Config, commands: &[Command]) -> Result<(), ConfigError> {
    let mut config = base.clone();

    for command in commands {
        if let Command::Configure(overrides) = command {
            overrides.apply(&mut config);
            validate(&config)?;
        }
    }

    Ok(())
}

/// Splits `a,b`, `[a,b]` or `a` into tag names
pub fn split_tags(token: &str) -> Vec<String> {
    token
        .trim_matches(|c| c == '[' || c == ']')
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses and canonicalizes a target URL
pub fn parse_target(value: &str) -> Result<Url, ConfigError> {
    normalize_url(value).map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", value, e)))
}

fn script_error(line: usize, err: clap::Error) -> ConfigError {
    let flag = match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(arg)) => arg.split_whitespace().next().unwrap_or_default().to_string(),
        _ => String::new(),
    };
    let empty_value = matches!(
        err.get(ContextKind::InvalidValue),
        Some(ContextValue::String(value)) if value.is_empty()
    );

    match err.kind() {
        ErrorKind::UnknownArgument => ConfigError::UnknownFlag { line, flag },
        ErrorKind::InvalidValue if empty_value => ConfigError::MissingArgument { line, flag },
        ErrorKind::TooFewValues => ConfigError::MissingArgument { line, flag },
        _ => {
            let source = std::error::Error::source(&err)
                .and_then(|source| source.downcast_ref::<ConfigError>());
            if let Some(ConfigError::UnknownFormat(format)) = source {
                return ConfigError::UnknownFormat(format.clone());
            }

            let message = err.to_string();
            let first = message.lines().next().unwrap_or_default();
            ConfigError::Script {
                line,
                message: first.trim_start_matches("error: ").to_string(),
            }
        }
    }
}
