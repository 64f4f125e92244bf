//! Observable catalog events
//!
//! Events are explicit and typed; log lines carry the string form.

use std::fmt;

/// Observable events in a bookshelf process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Interactive session started
    SessionStart,
    /// Interactive session finished
    SessionEnd,
    /// Configuration resolved
    ConfigLoaded,

    // Load / save
    /// Backing file load begins
    CatalogLoadBegin,
    /// Backing file loaded
    CatalogLoaded,
    /// A line with the wrong field count was dropped
    CatalogLineSkipped,
    /// Backing file rewritten
    CatalogSaved,
    /// Unrecoverable catalog failure (FATAL)
    CatalogFailure,

    // Mutations
    /// Record appended
    RecordAdded,
    /// Record removed
    RecordDeleted,
    /// Record status updated
    RecordStatusChanged,
    /// Status text rejected
    StatusRejected,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::SessionStart => "SESSION_START",
            Event::SessionEnd => "SESSION_END",
            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::CatalogLoadBegin => "CATALOG_LOAD_BEGIN",
            Event::CatalogLoaded => "CATALOG_LOADED",
            Event::CatalogLineSkipped => "CATALOG_LINE_SKIPPED",
            Event::CatalogSaved => "CATALOG_SAVED",
            Event::CatalogFailure => "CATALOG_FAILURE",

            Event::RecordAdded => "RECORD_ADDED",
            Event::RecordDeleted => "RECORD_DELETED",
            Event::RecordStatusChanged => "RECORD_STATUS_CHANGED",
            Event::StatusRejected => "STATUS_REJECTED",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::CatalogFailure)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
