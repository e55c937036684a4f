//! CLI module for adrow
//!
//! Provides command-line interface for:
//! - validate: validate JSON-lines records and print a report
//! - schema: print the active schema

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{print_schema, run, run_command, validate, validate_reader};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_records, write_error, write_response};
