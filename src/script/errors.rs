//! Script parse errors

use thiserror::Error;

/// Result type for script parsing
pub type ScriptResult<T> = Result<T, ScriptError>;

/// A line that could not be turned into a command. Lines are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("line {line}: malformed command `{text}`")]
    Malformed { line: usize, text: String },

    #[error("line {line}: unknown command `{name}`")]
    UnknownCommand { line: usize, name: String },

    #[error("line {line}: {command} expects {expected} argument(s), got {found}")]
    ArgumentCount {
        line: usize,
        command: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid argument `{value}` for {command}: {reason}")]
    InvalidArgument {
        line: usize,
        command: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl ScriptError {
    /// The 1-based line the error was found on
    pub fn line(&self) -> usize {
        match self {
            ScriptError::Malformed { line, .. }
            | ScriptError::UnknownCommand { line, .. }
            | ScriptError::ArgumentCount { line, .. }
            | ScriptError::InvalidArgument { line, .. } => *line,
        }
    }
}
