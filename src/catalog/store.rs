//! The catalog store
//!
//! [`Catalog`] owns the records, the id allocator and the path of the backing
//! file. Every mutation rewrites the whole file before it reports success.

use std::path::{Path, PathBuf};

use super::allocator::{IdAllocator, MAX_ID};
use super::codec::check_field;
use super::errors::{CatalogError, CatalogResult};
use super::reader::read_catalog_file;
use super::record::{BookRecord, BookStatus};
use super::writer::write_catalog_file;
use crate::observability::{log_event_with_fields, Event};

/// Default backing file name
pub const DEFAULT_CATALOG_FILE: &str = "library.txt";

/// Outcome of a mutation addressed by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// The record existed, was changed, and the file was rewritten
    Applied,
    /// No record has that id; nothing changed, nothing was written
    NotFound,
}

impl Mutation {
    pub fn is_applied(&self) -> bool {
        matches!(self, Mutation::Applied)
    }
}

/// In-memory book catalog synchronized with a flat file.
///
/// Single owner, single process. Record order is insertion order, which is
/// also file order and display order.
#[derive(Debug)]
pub struct Catalog {
    /// Backing file
    path: PathBuf,
    /// Records in display order
    records: Vec<BookRecord>,
    /// Next id to hand out
    ids: IdAllocator,
}

impl Catalog {
    /// Opens the catalog at `path`, loading any existing records.
    ///
    /// A missing file yields an empty catalog; the file is created on the
    /// first mutation.
    ///
    /// # Errors
    ///
    /// Any read failure other than absence, and corrupt lines. See
    /// [`Catalog::load`].
    pub fn open(path: impl Into<PathBuf>) -> CatalogResult<Self> {
        let mut catalog = Self {
            path: path.into(),
            records: Vec::new(),
            ids: IdAllocator::new(),
        };
        catalog.load()?;
        Ok(catalog)
    }

    /// Reloads records from the backing file, replacing the in-memory set.
    ///
    /// The allocator moves past the highest loaded id but never moves back.
    /// This is not a plain reset to max id + 1: if the file now holds lower
    /// ids than before, the next id still follows the highest one this
    /// process has seen or handed out.
    pub fn load(&mut self) -> CatalogResult<&[BookRecord]> {
        let path = self.path.display().to_string();
        log_event_with_fields(Event::CatalogLoadBegin, &[("path", &path)]);

        let report = read_catalog_file(&self.path)?;
        let max_id = report.records.iter().map(|r| r.id).max();

        self.records = report.records;
        self.ids.advance_past(max_id);

        log_event_with_fields(
            Event::CatalogLoaded,
            &[
                ("file_found", if report.file_found { "true" } else { "false" }),
                ("next_id", &self.ids.peek().to_string()),
                ("path", &path),
                ("records", &self.records.len().to_string()),
                ("skipped", &report.skipped_lines.len().to_string()),
            ],
        );

        Ok(&self.records)
    }

    /// Rewrites the backing file from the in-memory records.
    pub fn save(&self) -> CatalogResult<()> {
        write_catalog_file(&self.path, &self.records)?;
        log_event_with_fields(
            Event::CatalogSaved,
            &[
                ("path", &self.path.display().to_string()),
                ("records", &self.records.len().to_string()),
            ],
        );
        Ok(())
    }

    /// Appends a new in-stock record and persists.
    ///
    /// The id is consumed even if persisting fails.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidField`] if the title or author holds a line
    ///   break; no id is consumed
    /// - [`CatalogError::IdsExhausted`] once [`MAX_ID`] has been handed out
    /// - [`CatalogError::WriteFailed`] if persisting fails
    pub fn add(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
    ) -> CatalogResult<BookRecord> {
        let title = title.into();
        let author = author.into();
        check_field("title", &title)?;
        check_field("author", &author)?;

        let id = self
            .ids
            .allocate()
            .ok_or(CatalogError::IdsExhausted { last: MAX_ID })?;
        let record = BookRecord::new(id, title, author, year);
        self.records.push(record.clone());
        self.save()?;

        log_event_with_fields(Event::RecordAdded, &[("id", &record.id.to_string())]);
        Ok(record)
    }

    /// Removes the record with `id` and persists.
    pub fn delete(&mut self, id: u64) -> CatalogResult<Mutation> {
        let Some(index) = self.records.iter().position(|r| r.id == id) else {
            return Ok(Mutation::NotFound);
        };

        self.records.remove(index);
        self.save()?;

        log_event_with_fields(Event::RecordDeleted, &[("id", &id.to_string())]);
        Ok(Mutation::Applied)
    }

    /// Records whose title, author or year contains `term`, ignoring case.
    pub fn search(&self, term: &str) -> Vec<&BookRecord> {
        let needle = term.to_lowercase();
        self.records.iter().filter(|r| r.matches(&needle)).collect()
    }

    /// All records in display order
    pub fn list_all(&self) -> &[BookRecord] {
        &self.records
    }

    /// Parses `status` and applies it to the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidStatus`] without touching the
    /// catalog if `status` is not `in_stock` or `checked_out` (any case).
    pub fn set_status(&mut self, id: u64, status: &str) -> CatalogResult<Mutation> {
        let status = status.parse::<BookStatus>().map_err(|e| {
            log_event_with_fields(
                Event::StatusRejected,
                &[("id", &id.to_string()), ("status", status)],
            );
            e
        })?;
        self.update_status(id, status)
    }

    /// Sets the status of the record with `id` and persists.
    pub fn update_status(&mut self, id: u64, status: BookStatus) -> CatalogResult<Mutation> {
        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            return Ok(Mutation::NotFound);
        };

        record.status = status;
        self.save()?;

        log_event_with_fields(
            Event::RecordStatusChanged,
            &[("id", &id.to_string()), ("status", status.as_str())],
        );
        Ok(Mutation::Applied)
    }

    /// Looks up a record by id
    pub fn get(&self, id: u64) -> Option<&BookRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Id the next [`add`](Self::add) will assign
    pub fn next_id(&self) -> u64 {
        self.ids.peek()
    }
}
