//! Observability subsystem
//!
//! - Structured logging (JSON lines on stderr)
//! - Typed lifecycle and catalog events
//! - Monotonic operation counters
//!
//! Observability is read-only: it never changes catalog behavior and a
//! failed log write is swallowed.

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log an event with fields; warning events are emitted at WARN
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    if event.is_warning() {
        Logger::warn(event.as_str(), fields);
    } else {
        Logger::info(event.as_str(), fields);
    }
}
