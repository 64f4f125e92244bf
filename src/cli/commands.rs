//! CLI command implementations
//!
//! Every command resolves the configuration, opens the catalog, then either
//! enters the interactive menu or runs one operation and prints one JSON
//! line.

use std::io::{self, BufRead, Write};

use serde_json::json;

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_not_found, write_response};
use super::menu::Menu;
use crate::catalog::{Catalog, CatalogError, Mutation};
use crate::observability::{log_event_with_fields, Event, Logger};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_cli(&cli, stdin.lock(), stdout.lock())
}

/// Runs a parsed command line against the given console streams.
pub fn run_cli<R: BufRead, W: Write>(cli: &Cli, input: R, mut output: W) -> CliResult<()> {
    let config = Config::resolve(
        cli.config.as_deref(),
        cli.file.clone(),
        cli.log_level.as_deref(),
    )?;
    Logger::set_min_severity(config.min_severity()?);
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("catalog_path", &config.catalog_path().display().to_string()),
            ("log_level", &config.log_level),
        ],
    );

    let mut catalog = Catalog::open(config.catalog_path()).map_err(report_failure)?;
    run_command(&mut catalog, cli.command(), input, &mut output)
}

/// Run the appropriate command against an open catalog
pub fn run_command<R: BufRead, W: Write>(
    catalog: &mut Catalog,
    cmd: Command,
    input: R,
    output: &mut W,
) -> CliResult<()> {
    match cmd {
        Command::Menu => menu(catalog, input, output),
        Command::Add {
            title,
            author,
            year,
        } => add(catalog, title, author, year, output),
        Command::Delete { id } => delete(catalog, id, output),
        Command::Search { term } => search(catalog, &term, output),
        Command::List => list(catalog, output),
        Command::Status {
            id,
            status: new_status,
        } => status(catalog, id, &new_status, output),
    }
}

/// Interactive menu session
pub fn menu<R: BufRead, W: Write>(catalog: &mut Catalog, input: R, output: &mut W) -> CliResult<()> {
    Menu::new(catalog, input, output).run().map_err(|e| {
        log_failure(&e);
        e
    })
}

/// Add one book and print it
///
/// A title or author with a line break prints an error object and fails
/// the command.
pub fn add<W: Write>(
    catalog: &mut Catalog,
    title: String,
    author: String,
    year: i32,
    output: &mut W,
) -> CliResult<()> {
    match catalog.add(title, author, year) {
        Ok(record) => write_response(output, serde_json::to_value(&record)?),
        Err(e) if !e.is_fatal() => reject(output, e),
        Err(e) => Err(report_failure(e)),
    }
}

/// Delete one book by id
pub fn delete<W: Write>(catalog: &mut Catalog, id: u64, output: &mut W) -> CliResult<()> {
    match catalog.delete(id).map_err(report_failure)? {
        Mutation::Applied => write_response(output, json!({ "deleted": id })),
        Mutation::NotFound => write_not_found(output, id),
    }
}

/// Print every book matching `term`
pub fn search<W: Write>(catalog: &Catalog, term: &str, output: &mut W) -> CliResult<()> {
    let hits = catalog.search(term);
    write_response(output, serde_json::to_value(&hits)?)
}

/// Print every book
pub fn list<W: Write>(catalog: &Catalog, output: &mut W) -> CliResult<()> {
    write_response(output, serde_json::to_value(catalog.list_all())?)
}

/// Change the status of one book
///
/// An unrecognized status prints an error object and fails the command.
pub fn status<W: Write>(
    catalog: &mut Catalog,
    id: u64,
    status: &str,
    output: &mut W,
) -> CliResult<()> {
    match catalog.set_status(id, status) {
        Ok(Mutation::Applied) => {
            let record = catalog
                .get(id)
                .ok_or_else(|| CliError::io_error(format!("book {} vanished after update", id)))?;
            write_response(output, serde_json::to_value(record)?)
        }
        Ok(Mutation::NotFound) => write_not_found(output, id),
        Err(e) if !e.is_fatal() => reject(output, e),
        Err(e) => Err(report_failure(e)),
    }
}

/// Prints a rejected-input error object and fails the command
fn reject<W: Write>(output: &mut W, err: CatalogError) -> CliResult<()> {
    write_error(output, err.code(), &err.to_string())?;
    Err(err.into())
}

/// Logs a fatal catalog error and converts it for the caller
fn report_failure(err: CatalogError) -> CliError {
    let err = CliError::from(err);
    log_failure(&err);
    err
}

fn log_failure(err: &CliError) {
    if err.code_str() == "SHELF_CLI_CATALOG_ERROR" {
        log_event_with_fields(
            Event::CatalogFailure,
            &[("code", err.code_str()), ("message", err.message())],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run_args(args: &[&str]) -> (CliResult<()>, serde_json::Value) {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        let mut output = Vec::new();
        let result = run_cli(&cli, Cursor::new(Vec::new()), &mut output);
        let text = String::from_utf8(output).unwrap();
        let value = if text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(text.trim()).unwrap()
        };
        (result, value)
    }

    #[test]
    fn test_add_then_list() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("library.txt");
        let file = file.to_str().unwrap();

        let (result, value) = run_args(&[
            "bookshelf", "--file", file, "add", "--title", "Dune", "--author", "Herbert",
            "--year", "1965",
        ]);
        result.unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["data"]["id"], 1);
        assert_eq!(value["data"]["status"], "in_stock");

        let (result, value) = run_args(&["bookshelf", "--file", file, "list"]);
        result.unwrap();
        assert_eq!(value["data"].as_array().unwrap().len(), 1);
        assert_eq!(value["data"][0]["title"], "Dune");
    }

    #[test]
    fn test_delete_unknown_id() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("library.txt");

        let (result, value) =
            run_args(&["bookshelf", "--file", file.to_str().unwrap(), "delete", "3"]);
        result.unwrap();
        assert_eq!(value, json!({"status": "not_found", "id": 3}));
        assert!(!file.exists());
    }

    #[test]
    fn test_status_invalid_value() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("library.txt");
        fs::write(&file, "1|Dune|Herbert|1965|in_stock\n").unwrap();

        let (result, value) = run_args(&[
            "bookshelf",
            "--file",
            file.to_str().unwrap(),
            "status",
            "1",
            "lost",
        ]);
        assert_eq!(result.unwrap_err().code_str(), "SHELF_CLI_INVALID_INPUT");
        assert_eq!(value["status"], "error");
        assert_eq!(value["code"], "SHELF_INVALID_STATUS");
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "1|Dune|Herbert|1965|in_stock\n"
        );
    }

    #[test]
    fn test_status_and_search() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("library.txt");
        fs::write(
            &file,
            "1|Dune|Herbert|1965|in_stock\n2|Emma|Austen|1815|in_stock\n",
        )
        .unwrap();
        let file = file.to_str().unwrap();

        let (result, value) =
            run_args(&["bookshelf", "--file", file, "status", "2", "CHECKED_OUT"]);
        result.unwrap();
        assert_eq!(value["data"]["status"], "checked_out");

        let (result, value) = run_args(&["bookshelf", "--file", file, "search", "austen"]);
        result.unwrap();
        let hits = value["data"].as_array().unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["id"], 2);
        assert_eq!(hits[0]["status"], "checked_out");
    }

    #[test]
    fn test_add_rejects_line_break_in_title() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("library.txt");
        fs::write(&file, "1|Dune|Herbert|1965|in_stock\n").unwrap();

        let (result, value) = run_args(&[
            "bookshelf",
            "--file",
            file.to_str().unwrap(),
            "add",
            "--title",
            "Emma\n1|Forged|Nobody|2000|in_stock",
            "--author",
            "Austen",
            "--year",
            "1815",
        ]);
        assert_eq!(result.unwrap_err().code_str(), "SHELF_CLI_INVALID_INPUT");
        assert_eq!(value["status"], "error");
        assert_eq!(value["code"], "SHELF_INVALID_FIELD");
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "1|Dune|Herbert|1965|in_stock\n"
        );

        let (result, value) = run_args(&["bookshelf", "--file", file.to_str().unwrap(), "list"]);
        result.unwrap();
        assert_eq!(value["data"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_catalog_fails() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("library.txt");
        fs::write(&file, "1|Dune|Herbert|soon|in_stock\n").unwrap();

        let (result, value) =
            run_args(&["bookshelf", "--file", file.to_str().unwrap(), "list"]);
        assert_eq!(result.unwrap_err().code_str(), "SHELF_CLI_CATALOG_ERROR");
        assert_eq!(value, serde_json::Value::Null);
    }

    #[test]
    fn test_menu_is_default() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("library.txt");
        let cli = Cli::try_parse_from(["bookshelf", "--file", file.to_str().unwrap()]).unwrap();

        let mut output = Vec::new();
        run_cli(&cli, Cursor::new(b"1\nEmma\nAusten\n1815\n6\n".to_vec()), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("Menu:"));
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "1|Emma|Austen|1815|in_stock\n"
        );
    }
}
