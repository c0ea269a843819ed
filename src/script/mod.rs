//! Script front end
//!
//! Turns `Command(arg, ...);` lines into typed calls on a
//! `LibraryCatalog` and renders each result as text or JSON.

mod command;
mod errors;
mod parser;
mod report;
mod runner;

pub use command::ScriptCommand;
pub use errors::{ScriptError, ScriptResult};
pub use parser::{parse_line, parse_script};
pub use report::{OutputFormat, Report};
pub use runner::{RunSummary, ScriptRunner};
