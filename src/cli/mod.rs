//! CLI module for Librarium
//!
//! Provides command-line interface for:
//! - run: Execute a command script and write its reports
//! - check: Parse a script and report the command count

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, FormatArg};
pub use commands::{check_script, run, run_command, run_script, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{default_output_path, open_output, read_script, write_response, OUTPUT_SUFFIX};
