//! CLI argument definitions using clap
//!
//! Commands:
//! - bookshelf [menu]
//! - bookshelf add --title <t> --author <a> --year <y>
//! - bookshelf delete <id>
//! - bookshelf search <term>
//! - bookshelf list
//! - bookshelf status <id> <status>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// bookshelf - a small personal book catalog
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog file (overrides the configuration)
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Minimum log severity written to stderr (trace, info, warn, error, fatal)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive menu (default)
    Menu,

    /// Add a book
    Add {
        /// Book title
        #[arg(long)]
        title: String,

        /// Book author
        #[arg(long)]
        author: String,

        /// Publication year
        #[arg(long, allow_negative_numbers = true)]
        year: i32,
    },

    /// Delete a book by id
    Delete {
        /// Book id
        id: u64,
    },

    /// Search title, author and year, ignoring case
    Search {
        /// Search term
        term: String,
    },

    /// List every book
    List,

    /// Change the status of a book
    Status {
        /// Book id
        id: u64,

        /// New status: in_stock or checked_out
        status: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// The subcommand to run, defaulting to the interactive menu
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Menu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_menu() {
        let cli = Cli::try_parse_from(["bookshelf"]).unwrap();
        assert_eq!(cli.command(), Command::Menu);
        assert!(cli.config.is_none());
        assert!(cli.file.is_none());
    }

    #[test]
    fn test_add_with_negative_year() {
        let cli = Cli::try_parse_from([
            "bookshelf", "add", "--title", "Commentarii", "--author", "Caesar", "--year", "-50",
        ])
        .unwrap();
        assert_eq!(
            cli.command(),
            Command::Add {
                title: "Commentarii".into(),
                author: "Caesar".into(),
                year: -50,
            }
        );
    }

    #[test]
    fn test_global_file_after_subcommand() {
        let cli = Cli::try_parse_from(["bookshelf", "list", "--file", "/tmp/books.txt"]).unwrap();
        assert_eq!(cli.command(), Command::List);
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/books.txt")));
    }

    #[test]
    fn test_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["bookshelf", "delete", "three"]).is_err());
    }
}
