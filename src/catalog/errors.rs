//! Catalog error types
//!
//! Error codes:
//! - SHELF_CATALOG_READ_FAILED (FATAL severity)
//! - SHELF_CATALOG_WRITE_FAILED (FATAL severity)
//! - SHELF_CATALOG_CORRUPT_LINE (FATAL severity)
//! - SHELF_CATALOG_IDS_EXHAUSTED (FATAL severity)
//! - SHELF_INVALID_STATUS (ERROR severity)
//! - SHELF_INVALID_FIELD (ERROR severity)
//!
//! "Not found" is not an error: it is reported through [`super::Mutation`].

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Severity levels for catalog errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation rejected, caller may continue
    Error,
    /// Catalog state can no longer be trusted, process should exit
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Errors produced by the catalog store.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The backing file exists but could not be read
    #[error("[FATAL] SHELF_CATALOG_READ_FAILED: failed to read {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The backing file could not be rewritten
    #[error("[FATAL] SHELF_CATALOG_WRITE_FAILED: failed to write {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line has the right shape but its contents cannot be trusted
    #[error("[FATAL] SHELF_CATALOG_CORRUPT_LINE: line {line}: {reason}")]
    CorruptLine { line: usize, reason: String },

    /// Every representable id has been handed out
    #[error("[FATAL] SHELF_CATALOG_IDS_EXHAUSTED: no id left after {last}")]
    IdsExhausted { last: u64 },

    /// Status text is not one of the accepted values
    #[error("[ERROR] SHELF_INVALID_STATUS: '{0}' (expected 'in_stock' or 'checked_out')")]
    InvalidStatus(String),

    /// A title or author cannot be stored on a single line
    #[error("[ERROR] SHELF_INVALID_FIELD: {field} {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl CatalogError {
    pub fn read_failed(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ReadFailed {
            path: path.into(),
            source,
        }
    }

    pub fn write_failed(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::WriteFailed {
            path: path.into(),
            source,
        }
    }

    pub fn corrupt_line(line: usize, reason: impl Into<String>) -> Self {
        Self::CorruptLine {
            line,
            reason: reason.into(),
        }
    }

    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::ReadFailed { .. } => "SHELF_CATALOG_READ_FAILED",
            CatalogError::WriteFailed { .. } => "SHELF_CATALOG_WRITE_FAILED",
            CatalogError::CorruptLine { .. } => "SHELF_CATALOG_CORRUPT_LINE",
            CatalogError::IdsExhausted { .. } => "SHELF_CATALOG_IDS_EXHAUSTED",
            CatalogError::InvalidStatus(_) => "SHELF_INVALID_STATUS",
            CatalogError::InvalidField { .. } => "SHELF_INVALID_FIELD",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            CatalogError::InvalidStatus(_) | CatalogError::InvalidField { .. } => Severity::Error,
            _ => Severity::Fatal,
        }
    }

    /// Returns whether this error requires process termination
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
