//! Backing file reader
//!
//! - A missing file is an empty catalog, not an error
//! - Lines with the wrong field count are skipped with a WARN event
//! - Five-field lines that fail to parse, and duplicate ids, halt the load

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use super::codec::{decode_line, DecodeOutcome};
use super::errors::{CatalogError, CatalogResult};
use super::record::BookRecord;
use crate::observability::{log_event_with_fields, Event};

/// Outcome of scanning the backing file.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Records in file order
    pub records: Vec<BookRecord>,
    /// 1-based line numbers that were dropped for having the wrong field count
    pub skipped_lines: Vec<usize>,
    /// Whether the file existed at all
    pub file_found: bool,
}

/// Reads every record from the backing file.
///
/// # Errors
///
/// - [`CatalogError::ReadFailed`] if the file exists but cannot be read
///   (permissions, invalid UTF-8)
/// - [`CatalogError::CorruptLine`] for an unparsable five-field line or a
///   repeated id
pub fn read_catalog_file(path: &Path) -> CatalogResult<LoadReport> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(LoadReport::default()),
        Err(e) => return Err(CatalogError::read_failed(path, e)),
    };

    let mut report = LoadReport {
        file_found: true,
        ..LoadReport::default()
    };
    let mut seen = HashSet::new();

    for (index, raw) in content.lines().enumerate() {
        let line_number = index + 1;
        match decode_line(line_number, raw)? {
            DecodeOutcome::Record(record) => {
                if !seen.insert(record.id) {
                    return Err(CatalogError::corrupt_line(
                        line_number,
                        format!("duplicate id {}", record.id),
                    ));
                }
                report.records.push(record);
            }
            DecodeOutcome::Blank => {}
            DecodeOutcome::Malformed { fields } => {
                log_event_with_fields(
                    Event::CatalogLineSkipped,
                    &[
                        ("fields", &fields.to_string()),
                        ("line", &line_number.to_string()),
                        ("path", &path.display().to_string()),
                    ],
                );
                report.skipped_lines.push(line_number);
            }
        }
    }

    Ok(report)
}
