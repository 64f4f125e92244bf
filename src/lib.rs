//! bookshelf - a small personal book catalog
//!
//! Records live in memory and are mirrored to a flat `|`-delimited text
//! file after every change.

pub mod catalog;
pub mod cli;
pub mod observability;

pub use catalog::{BookRecord, BookStatus, Catalog, CatalogError, CatalogResult, Mutation};
