//! Book catalog subsystem
//!
//! Holds every book record in memory and mirrors the whole collection to a
//! flat, `|`-delimited text file after each mutation.
//!
//! # Design Principles
//!
//! - Whole-file rewrite on every mutation (no partial or batched writes)
//! - Ids are allocated by the owning [`Catalog`], never reused in a process
//! - A missing backing file is an empty catalog
//! - Lines with the wrong field count are skipped, anything else unreadable halts
//! - "Not found" is an outcome ([`Mutation::NotFound`]), not an error

mod allocator;
mod codec;
mod errors;
mod reader;
mod record;
mod store;
mod writer;

pub use allocator::{IdAllocator, MAX_ID};
pub use codec::{check_field, decode_line, encode_line, DecodeOutcome, DELIMITER, FIELD_COUNT};
pub use errors::{CatalogError, CatalogResult, Severity};
pub use reader::{read_catalog_file, LoadReport};
pub use record::{BookRecord, BookStatus};
pub use store::{Catalog, Mutation, DEFAULT_CATALOG_FILE};
pub use writer::write_catalog_file;
