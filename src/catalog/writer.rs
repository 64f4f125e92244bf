//! Backing file writer
//!
//! Every save truncates the file and writes the whole collection, then
//! fsyncs. Nothing is appended in place.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use super::codec::encode_line;
use super::errors::{CatalogError, CatalogResult};
use super::record::BookRecord;

/// Replaces the backing file with `records`, one line each, in order.
///
/// Creates missing parent directories.
///
/// # Errors
///
/// Returns [`CatalogError::WriteFailed`] if any step fails. The file may be
/// left partially written; there is no rollback.
pub fn write_catalog_file(path: &Path, records: &[BookRecord]) -> CatalogResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| CatalogError::write_failed(parent, e))?;
        }
    }

    let file = File::create(path).map_err(|e| CatalogError::write_failed(path, e))?;
    let mut writer = BufWriter::new(file);

    for record in records {
        writer
            .write_all(encode_line(record).as_bytes())
            .map_err(|e| CatalogError::write_failed(path, e))?;
    }

    let file = writer
        .into_inner()
        .map_err(|e| CatalogError::write_failed(path, e.into_error()))?;
    file.sync_all()
        .map_err(|e| CatalogError::write_failed(path, e))?;

    Ok(())
}
