//! CLI module for bookshelf
//!
//! Provides the command-line interface:
//! - menu: interactive session (default)
//! - add / delete / search / list / status: one-shot, JSON output

mod args;
mod commands;
mod config;
mod errors;
mod io;
mod menu;

pub use args::{Cli, Command};
pub use commands::{add, delete, list, menu, run, run_cli, run_command, search, status};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_not_found, write_response};
pub use menu::{Menu, MenuChoice};
