//! Line codec for the backing file
//!
//! Each record is one line:
//!
//! ```text
//! id|title|author|year|status
//! ```
//!
//! Fields are not escaped. A `|` inside a title or author shifts the field
//! count and the line is skipped on the next load. Line breaks would split
//! the record, so [`check_field`] rejects them before anything is written.

use super::allocator::MAX_ID;
use super::errors::{CatalogError, CatalogResult};
use super::record::{BookRecord, BookStatus};

/// Field separator
pub const DELIMITER: char = '|';

/// Number of fields in a well-formed line
pub const FIELD_COUNT: usize = 5;

/// Result of decoding a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// A complete record
    Record(BookRecord),
    /// Empty or whitespace-only line
    Blank,
    /// Wrong number of fields; tolerated and skipped by the loader
    Malformed { fields: usize },
}

/// Encodes a record as a line, including the trailing newline.
pub fn encode_line(record: &BookRecord) -> String {
    format!(
        "{id}{d}{title}{d}{author}{d}{year}{d}{status}\n",
        id = record.id,
        title = record.title,
        author = record.author,
        year = record.year,
        status = record.status,
        d = DELIMITER,
    )
}

/// Rejects a title or author that cannot be written as part of one line.
pub fn check_field(field: &'static str, value: &str) -> CatalogResult<()> {
    if value.contains(['\n', '\r']) {
        return Err(CatalogError::invalid_field(
            field,
            "must not contain line breaks",
        ));
    }
    Ok(())
}

/// Decodes one line of the backing file.
///
/// `line_number` is 1-based and only used for error context.
///
/// # Errors
///
/// Returns [`CatalogError::CorruptLine`] when the line has five fields but
/// the id, year or status cannot be parsed.
pub fn decode_line(line_number: usize, raw: &str) -> CatalogResult<DecodeOutcome> {
    let line = raw.trim();
    if line.is_empty() {
        return Ok(DecodeOutcome::Blank);
    }

    let fields: Vec<&str> = line.split(DELIMITER).collect();
    if fields.len() != FIELD_COUNT {
        return Ok(DecodeOutcome::Malformed {
            fields: fields.len(),
        });
    }

    let id = fields[0].trim().parse::<u64>().map_err(|e| {
        CatalogError::corrupt_line(line_number, format!("invalid id '{}': {}", fields[0], e))
    })?;
    if id > MAX_ID {
        return Err(CatalogError::corrupt_line(
            line_number,
            format!("id {} is above the highest allowed id {}", id, MAX_ID),
        ));
    }
    let year = fields[3].trim().parse::<i32>().map_err(|e| {
        CatalogError::corrupt_line(line_number, format!("invalid year '{}': {}", fields[3], e))
    })?;
    let status = fields[4].parse::<BookStatus>().map_err(|_| {
        CatalogError::corrupt_line(line_number, format!("invalid status '{}'", fields[4]))
    })?;

    Ok(DecodeOutcome::Record(
        BookRecord::new(id, fields[1], fields[2], year).with_status(status),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_line_format() {
        let record = BookRecord::new(1, "Dune", "Herbert", 1965);
        assert_eq!(encode_line(&record), "1|Dune|Herbert|1965|in_stock\n");
    }

    #[test]
    fn test_decode_well_formed_line() {
        let outcome = decode_line(1, "12|Solaris|Stanislaw Lem|1961|checked_out\n").unwrap();
        let expected = BookRecord::new(12, "Solaris", "Stanislaw Lem", 1961)
            .with_status(BookStatus::CheckedOut);
        assert_eq!(outcome, DecodeOutcome::Record(expected));
    }

    #[test]
    fn test_decode_keeps_inner_spaces() {
        let outcome = decode_line(1, "3|The Left Hand of Darkness|Ursula K. Le Guin|1969|in_stock").unwrap();
        match outcome {
            DecodeOutcome::Record(record) => {
                assert_eq!(record.title, "The Left Hand of Darkness");
                assert_eq!(record.author, "Ursula K. Le Guin");
            }
            other => panic!("expected record, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_blank_line() {
        assert_eq!(decode_line(1, "").unwrap(), DecodeOutcome::Blank);
        assert_eq!(decode_line(1, "   \r\n").unwrap(), DecodeOutcome::Blank);
    }

    #[test]
    fn test_decode_wrong_field_count_is_malformed() {
        assert_eq!(
            decode_line(1, "1|Dune|Herbert").unwrap(),
            DecodeOutcome::Malformed { fields: 3 }
        );
        assert_eq!(
            decode_line(1, "1|Dune|Herbert|1965|in_stock|extra").unwrap(),
            DecodeOutcome::Malformed { fields: 6 }
        );
    }

    #[test]
    fn test_decode_bad_year_is_corrupt() {
        let err = decode_line(4, "1|Dune|Herbert|nineteen|in_stock").unwrap_err();
        assert!(matches!(err, CatalogError::CorruptLine { line: 4, .. }));
        assert!(err.to_string().contains("invalid year"));
    }

    #[test]
    fn test_decode_bad_id_and_status_are_corrupt() {
        assert!(matches!(
            decode_line(2, "x|Dune|Herbert|1965|in_stock").unwrap_err(),
            CatalogError::CorruptLine { line: 2, .. }
        ));
        assert!(matches!(
            decode_line(2, "1|Dune|Herbert|1965|lost").unwrap_err(),
            CatalogError::CorruptLine { line: 2, .. }
        ));
    }

    #[test]
    fn test_delimiter_in_field_shifts_field_count() {
        let record = BookRecord::new(1, "Either|Or", "Kierkegaard", 1843);
        let line = encode_line(&record);
        assert_eq!(
            decode_line(1, &line).unwrap(),
            DecodeOutcome::Malformed { fields: 6 }
        );
    }

    #[test]
    fn test_decode_id_without_successor_is_corrupt() {
        let err = decode_line(1, "18446744073709551615|Dune|Herbert|1965|in_stock").unwrap_err();
        assert!(matches!(err, CatalogError::CorruptLine { line: 1, .. }));
        assert!(err.to_string().contains("highest allowed id"));

        let line = format!("{}|Dune|Herbert|1965|in_stock", MAX_ID);
        assert!(matches!(
            decode_line(1, &line).unwrap(),
            DecodeOutcome::Record(_)
        ));
    }

    #[test]
    fn test_check_field_rejects_line_breaks() {
        assert!(check_field("title", "The Left Hand of Darkness").is_ok());
        assert!(check_field("title", "Either|Or").is_ok());

        let err = check_field("title", "Dune\n2|Emma|Austen|1815|in_stock").unwrap_err();
        assert_eq!(err.code(), "SHELF_INVALID_FIELD");
        assert!(check_field("author", "Frank\rHerbert").is_err());
    }
}
