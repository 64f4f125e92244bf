//! Observability for bookshelf
//!
//! Structured JSON-line logging of catalog lifecycle events. Logging is
//! read-only: it never changes what an operation does, and a failed log
//! write is ignored.
//!
//! ```ignore
//! use bookshelf::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::RecordAdded, &[("id", "3")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity, DEFAULT_MIN_SEVERITY};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(default_severity(event), event.as_str(), fields);
}

/// Severity an event is logged at unless the caller picks one
fn default_severity(event: Event) -> Severity {
    match event {
        Event::CatalogFailure => Severity::Fatal,
        Event::CatalogLineSkipped | Event::StatusRejected => Severity::Warn,
        Event::CatalogLoadBegin => Severity::Trace,
        _ => Severity::Info,
    }
}
