//! Book record types
//!
//! A [`BookRecord`] is one catalog entry. Its descriptive fields never change
//! after construction; only [`BookStatus`] moves, freely, between its two
//! values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::CatalogError;

/// Availability of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    /// On the shelf
    #[default]
    InStock,
    /// Lent out
    CheckedOut,
}

impl BookStatus {
    /// Canonical text form, as written to the backing file
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::InStock => "in_stock",
            BookStatus::CheckedOut => "checked_out",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = CatalogError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "in_stock" => Ok(BookStatus::InStock),
            "checked_out" => Ok(BookStatus::CheckedOut),
            _ => Err(CatalogError::InvalidStatus(s.to_string())),
        }
    }
}

/// One book in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub status: BookStatus,
}

impl BookRecord {
    /// Create a new in-stock record with an already allocated id
    pub fn new(id: u64, title: impl Into<String>, author: impl Into<String>, year: i32) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            year,
            status: BookStatus::InStock,
        }
    }

    /// Returns a copy with the given status
    pub fn with_status(mut self, status: BookStatus) -> Self {
        self.status = status;
        self
    }

    /// Case-insensitive substring match against title, author and year.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.author.to_lowercase().contains(needle)
            || self.year.to_string().contains(needle)
    }
}

impl fmt::Display for BookRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Author: {}", self.author)?;
        writeln!(f, "Year: {}", self.year)?;
        write!(f, "Status: {}", self.status)
    }
}
