//! Skraper main entry point
//!
//! This is the command-line interface for the Skraper crawler and extractor.

use anyhow::Context;
use clap::{CommandFactory, Parser};
use skraper::config::{read_config_with_hash, validate, Config};
use skraper::driver::{parse_script, validate_commands, Cli, Command, Session};
use skraper::ConfigError;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_settings(&cli)?;

    // Scripts and flags are parsed and checked in full before any request goes out
    let script_commands = match &cli.script {
        Some(path) => load_script(path, &config)?,
        None => Vec::new(),
    };
    let cli_commands = cli.commands()?;

    if script_commands.is_empty() && cli_commands.is_empty() {
        Cli::command().print_help()?;
        return Ok(());
    }

    handle_session(config, script_commands, cli_commands).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("skraper=info,warn"),
            1 => EnvFilter::new("skraper=debug,info"),
            2 => EnvFilter::new("skraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any), layers CLI flags on top and validates
///
/// Only the merged result is validated, so a flag can correct a bad file value.
fn load_settings(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = read_config_with_hash(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    cli.overrides().apply(&mut config);
    validate(&config)?;

    if config.http.ignore_robots {
        tracing::debug!("--ignore-robots given; robots.txt is not consulted in any case");
    }

    Ok(config)
}

fn load_script(path: &Path, config: &Config) -> anyhow::Result<Vec<Command>> {
    tracing::info!("Loading command script from: {}", path.display());
    let text = std::fs::read_to_string(path)
        .map_err(ConfigError::Io)
        .with_context(|| format!("Failed to read script {}", path.display()))?;

    let commands = parse_script(&text)?;
    validate_commands(config, &commands)?;

    tracing::debug!("Script holds {} commands", commands.len());
    Ok(commands)
}

/// Runs script commands, then command-line commands, in one session
async fn handle_session(
    config: Config,
    script_commands: Vec<Command>,
    cli_commands: Vec<Command>,
) -> anyhow::Result<()> {
    let mut session = Session::new(config)?;

    let mut failures = session.run(&script_commands).await;
    failures += session.run(&cli_commands).await;

    if failures > 0 {
        tracing::warn!("{} command(s) failed", failures);
    }
    tracing::info!("Session finished with {} records", session.results().len());

    Ok(())
}
