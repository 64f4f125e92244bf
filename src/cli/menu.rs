//! Interactive text menu
//!
//! Reads choices line by line and drives the [`Catalog`]. Year and id prompts
//! repeat until they get an integer. End of input leaves the menu cleanly.

use std::io::{BufRead, Write};
use std::str::FromStr;

use super::errors::CliResult;
use crate::catalog::{Catalog, CatalogError, Mutation};
use crate::observability::{log_event, log_event_with_fields, Event};

/// Menu entries, numbered as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Delete,
    Search,
    ShowAll,
    ChangeStatus,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::Delete),
            "3" => Some(MenuChoice::Search),
            "4" => Some(MenuChoice::ShowAll),
            "5" => Some(MenuChoice::ChangeStatus),
            "6" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Whether the session should keep going after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    EndOfInput,
}

/// Interactive session over a catalog.
pub struct Menu<'a, R, W> {
    catalog: &'a mut Catalog,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(catalog: &'a mut Catalog, input: R, output: W) -> Self {
        Self {
            catalog,
            input,
            output,
        }
    }

    /// Runs until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Console I/O failures and fatal catalog errors. Invalid input and
    /// unknown ids are reported to the user and do not end the session.
    pub fn run(&mut self) -> CliResult<()> {
        log_event_with_fields(
            Event::SessionStart,
            &[("records", &self.catalog.len().to_string())],
        );

        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Choose an action: ")? else {
                break;
            };

            let flow = match MenuChoice::parse(&choice) {
                Some(MenuChoice::Add) => self.add_book()?,
                Some(MenuChoice::Delete) => self.delete_book()?,
                Some(MenuChoice::Search) => self.search_books()?,
                Some(MenuChoice::ShowAll) => self.show_all_books()?,
                Some(MenuChoice::ChangeStatus) => self.change_status()?,
                Some(MenuChoice::Exit) => break,
                None => {
                    writeln!(self.output, "Invalid choice.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::EndOfInput {
                break;
            }
        }

        log_event(Event::SessionEnd);
        Ok(())
    }

    fn print_menu(&mut self) -> CliResult<()> {
        writeln!(self.output, "Menu:")?;
        writeln!(self.output, "1. Add book")?;
        writeln!(self.output, "2. Delete book")?;
        writeln!(self.output, "3. Search books")?;
        writeln!(self.output, "4. Show all books")?;
        writeln!(self.output, "5. Change book status")?;
        writeln!(self.output, "6. Exit")?;
        Ok(())
    }

    fn add_book(&mut self) -> CliResult<Flow> {
        let Some(title) = self.prompt("Enter title: ")? else {
            return Ok(Flow::EndOfInput);
        };
        let Some(author) = self.prompt("Enter author: ")? else {
            return Ok(Flow::EndOfInput);
        };
        let Some(year) =
            self.prompt_number::<i32>("Enter publication year: ", "Invalid year. Try again.")?
        else {
            return Ok(Flow::EndOfInput);
        };

        match self.catalog.add(title, author, year) {
            Ok(record) => writeln!(self.output, "Book added with ID {}.", record.id)?,
            Err(CatalogError::InvalidField { field, .. }) => {
                writeln!(self.output, "Invalid {}: line breaks are not allowed.", field)?
            }
            Err(e) => return Err(e.into()),
        }
        Ok(Flow::Continue)
    }

    fn delete_book(&mut self) -> CliResult<Flow> {
        let Some(id) =
            self.prompt_number::<u64>("Enter book ID to delete: ", "Invalid ID. Try again.")?
        else {
            return Ok(Flow::EndOfInput);
        };

        match self.catalog.delete(id)? {
            Mutation::Applied => writeln!(self.output, "Book deleted!")?,
            Mutation::NotFound => writeln!(self.output, "Book not found.")?,
        }
        Ok(Flow::Continue)
    }

    fn search_books(&mut self) -> CliResult<Flow> {
        let Some(term) = self.prompt("Enter search term (title, author or year): ")? else {
            return Ok(Flow::EndOfInput);
        };

        let hits = self.catalog.search(&term);
        if hits.is_empty() {
            writeln!(self.output, "No books found.")?;
        } else {
            writeln!(self.output, "Books found:")?;
            for record in hits {
                writeln!(self.output, "{}\n", record)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn show_all_books(&mut self) -> CliResult<Flow> {
        let records = self.catalog.list_all();
        if records.is_empty() {
            writeln!(self.output, "The library is empty.")?;
        } else {
            writeln!(self.output, "All books:")?;
            for record in records {
                writeln!(self.output, "{}\n", record)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn change_status(&mut self) -> CliResult<Flow> {
        let Some(id) = self.prompt_number::<u64>(
            "Enter book ID to change status: ",
            "Invalid ID. Try again.",
        )?
        else {
            return Ok(Flow::EndOfInput);
        };

        if self.catalog.get(id).is_none() {
            writeln!(self.output, "Book not found.")?;
            return Ok(Flow::Continue);
        }

        let Some(status) = self.prompt("Enter new status ('in_stock' or 'checked_out'): ")? else {
            return Ok(Flow::EndOfInput);
        };

        match self.catalog.set_status(id, &status) {
            Ok(Mutation::Applied) => writeln!(self.output, "Book status updated!")?,
            Ok(Mutation::NotFound) => writeln!(self.output, "Book not found.")?,
            Err(CatalogError::InvalidStatus(_)) => writeln!(self.output, "Invalid status.")?,
            Err(e) => return Err(e.into()),
        }
        Ok(Flow::Continue)
    }

    /// Prints `label` and reads one line without its line ending.
    /// Returns `None` at end of input.
    fn prompt(&mut self, label: &str) -> CliResult<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Prompts until the answer parses as `T`.
    fn prompt_number<T: FromStr>(&mut self, label: &str, retry: &str) -> CliResult<Option<T>> {
        loop {
            let Some(answer) = self.prompt(label)? else {
                return Ok(None);
            };
            match answer.trim().parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "{}", retry)?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn run_session(catalog: &mut Catalog, script: &str) -> String {
        let mut output = Vec::new();
        Menu::new(catalog, Cursor::new(script.as_bytes()), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    fn create_test_catalog() -> (Catalog, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let catalog = Catalog::open(temp_dir.path().join("library.txt")).unwrap();
        (catalog, temp_dir)
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Add));
        assert_eq!(MenuChoice::parse(" 6 "), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("7"), None);
        assert_eq!(MenuChoice::parse("add"), None);
    }

    #[test]
    fn test_add_retries_invalid_year() {
        let (mut catalog, _temp_dir) = create_test_catalog();

        let output = run_session(&mut catalog, "1\nDune\nHerbert\nsoon\n1965\n6\n");
        assert!(output.contains("Invalid year. Try again."));
        assert!(output.contains("Book added with ID 1."));
        assert_eq!(catalog.get(1).unwrap().year, 1965);
    }

    #[test]
    fn test_delete_reports_not_found() {
        let (mut catalog, _temp_dir) = create_test_catalog();
        catalog.add("Dune", "Herbert", 1965).unwrap();

        let output = run_session(&mut catalog, "2\nx\n9\n2\n1\n6\n");
        assert!(output.contains("Invalid ID. Try again."));
        assert!(output.contains("Book not found."));
        assert!(output.contains("Book deleted!"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_search_and_show_all() {
        let (mut catalog, _temp_dir) = create_test_catalog();

        let output = run_session(&mut catalog, "4\n3\ndune\n");
        assert!(output.contains("The library is empty."));
        assert!(output.contains("No books found."));

        catalog.add("Dune", "Herbert", 1965).unwrap();
        let output = run_session(&mut catalog, "3\nDUNE\n4\n6\n");
        assert!(output.contains("Books found:"));
        assert!(output.contains("All books:"));
        assert_eq!(output.matches("Title: Dune").count(), 2);
    }

    #[test]
    fn test_change_status_flow() {
        let (mut catalog, _temp_dir) = create_test_catalog();
        catalog.add("Dune", "Herbert", 1965).unwrap();

        let output = run_session(
            &mut catalog,
            "5\n4\n5\n1\nmissing\n5\n1\nChecked_Out\n6\n",
        );
        assert!(output.contains("Book not found."));
        assert!(output.contains("Invalid status."));
        assert!(output.contains("Book status updated!"));
        assert_eq!(
            catalog.get(1).unwrap().status,
            crate::catalog::BookStatus::CheckedOut
        );
    }

    #[test]
    fn test_add_rejects_embedded_carriage_return() {
        let (mut catalog, _temp_dir) = create_test_catalog();

        let output = run_session(&mut catalog, "1\nDu\rne\nHerbert\n1965\n6\n");
        assert!(output.contains("Invalid title: line breaks are not allowed."));
        assert!(catalog.is_empty());
        assert!(!catalog.path().exists());
    }

    #[test]
    fn test_unknown_choice_and_end_of_input() {
        let (mut catalog, _temp_dir) = create_test_catalog();

        let output = run_session(&mut catalog, "9\n1\nHalf a book\n");
        assert!(output.contains("Invalid choice."));
        assert!(catalog.is_empty());
    }
}
