//! Observability subsystem
//!
//! - Structured logging (JSON lines on stderr)
//! - Counter metrics
//! - Typed lifecycle events
//!
//! Observability is read-only: it never changes a validation outcome.
//!
//! ```ignore
//! use adrow::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::BatchComplete, &[("records", "42")]);
//! ```

use std::io::{self, Write};

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

fn severity_of(event: Event) -> Severity {
    if event.is_fatal() {
        Severity::Fatal
    } else if event.is_warning() {
        Severity::Warn
    } else {
        Severity::Info
    }
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    write_event(event, fields, &mut io::stderr());
}

fn write_event<W: Write>(event: Event, fields: &[(&str, &str)], writer: &mut W) {
    Logger::log_to_writer(severity_of(event), event.as_str(), fields, writer);
}
