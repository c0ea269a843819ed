//! Observable catalog events
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events in a catalog run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Configuration loaded (or defaulted)
    ConfigLoaded,
    /// Script execution started
    ScriptBegin,
    /// Script execution finished
    ScriptComplete,
    /// Script stopped at a Quit command
    ScriptQuit,
    /// A script line named no known command and was skipped
    UnknownCommand,

    // Catalog
    /// A book was removed and its waitlist cancelled
    BookDeleted,
    /// A reservation was dropped because the waitlist was full
    WaitlistFull,
    /// A patron tried to return a book they do not hold
    ReturnConflict,

    /// Final counters
    Metrics,
}

impl Event {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ScriptBegin => "SCRIPT_BEGIN",
            Event::ScriptComplete => "SCRIPT_COMPLETE",
            Event::ScriptQuit => "SCRIPT_QUIT",
            Event::UnknownCommand => "UNKNOWN_COMMAND",
            Event::BookDeleted => "BOOK_DELETED",
            Event::WaitlistFull => "WAITLIST_FULL",
            Event::ReturnConflict => "RETURN_CONFLICT",
            Event::Metrics => "METRICS",
        }
    }

    /// Whether this event signals a problem worth a WARN line
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Event::UnknownCommand | Event::WaitlistFull | Event::ReturnConflict
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_strings_are_screaming_snake() {
        let events = [
            Event::ConfigLoaded,
            Event::ScriptBegin,
            Event::ScriptComplete,
            Event::ScriptQuit,
            Event::UnknownCommand,
            Event::BookDeleted,
            Event::WaitlistFull,
            Event::ReturnConflict,
            Event::Metrics,
        ];
        for event in events {
            let s = event.as_str();
            assert!(s.chars().all(|c| c.is_ascii_uppercase() || c == '_'), "{}", s);
        }
    }

    #[test]
    fn test_warning_events() {
        assert!(Event::WaitlistFull.is_warning());
        assert!(Event::ReturnConflict.is_warning());
        assert!(Event::UnknownCommand.is_warning());
        assert!(!Event::BookDeleted.is_warning());
    }
}
