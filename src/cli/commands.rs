//! CLI command implementations
//!
//! `run` loads configuration, parses the whole script up front and then
//! executes it against a fresh catalog. `check` only parses.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::catalog::{CatalogConfig, LibraryCatalog};
use crate::observability::{log_event, Event, Logger};
use crate::script::{parse_script, OutputFormat, RunSummary, ScriptRunner};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{open_output, read_script, write_response};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub catalog: CatalogConfig,

    /// Log a metrics snapshot after each run (optional, default true)
    #[serde(default = "default_emit_metrics")]
    pub emit_metrics: bool,
}

fn default_emit_metrics() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            emit_metrics: default_emit_metrics(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> CliResult<()> {
        self.catalog.validate()?;
        Ok(())
    }
}

/// Main CLI entry point
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Run {
            input,
            output,
            config,
            format,
        } => {
            let config = Config::load_or_default(config.as_deref())?;
            run_script(&input, output.as_deref(), &config, format.into()).map(|_| ())
        }
        Command::Check { input } => {
            let count = check_script(&input)?;
            write_response(json!({
                "script": input.display().to_string(),
                "commands": count,
            }))
        }
    }
}

/// Execute a script file and write its reports
pub fn run_script(
    input: &Path,
    output: Option<&Path>,
    config: &Config,
    format: OutputFormat,
) -> CliResult<RunSummary> {
    log_event(
        Event::ConfigLoaded,
        &[
            ("waitlist_capacity", config.catalog.waitlist_capacity.to_string().as_str()),
            ("emit_metrics", config.emit_metrics.to_string().as_str()),
        ],
    );

    let source = read_script(input)?;
    let commands = parse_script(&source)?;

    let catalog = LibraryCatalog::with_config(config.catalog.clone())?;
    let mut runner = ScriptRunner::new(catalog, format);

    let mut out = open_output(input, output)?;
    let summary = runner.run(&commands, &mut out)?;

    if config.emit_metrics {
        let snapshot = runner.catalog().metrics().to_json();
        Logger::info(Event::Metrics.as_str(), &[("snapshot", snapshot.as_str())]);
    }

    Ok(summary)
}

/// Parse a script file without executing it; returns the command count
pub fn check_script(input: &Path) -> CliResult<usize> {
    let source = read_script(input)?;
    let commands = parse_script(&source)?;
    Ok(commands.len())
}
