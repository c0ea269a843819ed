//! CLI argument definitions using clap
//!
//! Commands:
//! - librarium run <INPUT> [--output <path>] [--config <path>] [--format text|json]
//! - librarium check <INPUT>

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::script::OutputFormat;

/// Librarium - a library catalog driven by command scripts
#[derive(Parser, Debug)]
#[command(name = "librarium")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Execute a command script against a fresh catalog
    Run {
        /// Script file, one command per line
        input: PathBuf,

        /// Output file; `-` writes to stdout (default: <input stem>_output_file.txt)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Report format
        #[arg(long, value_enum, default_value_t = FormatArg::Text)]
        format: FormatArg,
    },

    /// Parse a script without executing it
    Check {
        /// Script file, one command per line
        input: PathBuf,
    },
}

/// Report format accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_defaults() {
        let cli = Cli::try_parse_from(["librarium", "run", "books.txt"]).unwrap();
        match cli.command {
            Command::Run {
                input,
                output,
                config,
                format,
            } => {
                assert_eq!(input, PathBuf::from("books.txt"));
                assert!(output.is_none());
                assert!(config.is_none());
                assert_eq!(format, FormatArg::Text);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_run_with_flags() {
        let cli = Cli::try_parse_from([
            "librarium", "run", "in.txt", "--output", "-", "--format", "json",
        ])
        .unwrap();
        match cli.command {
            Command::Run { output, format, .. } => {
                assert_eq!(output, Some(PathBuf::from("-")));
                assert_eq!(OutputFormat::from(format), OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_missing_input_rejected() {
        assert!(Cli::try_parse_from(["librarium", "run"]).is_err());
    }
}
