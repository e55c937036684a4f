//! CLI argument definitions using clap
//!
//! Commands:
//! - adrow validate [--input <path>] [--config <path>] [--schema <path>]
//! - adrow schema [--schema <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// adrow - strict validation of advertising-campaign records
#[derive(Parser, Debug)]
#[command(name = "adrow")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate JSON-lines records and print a report
    Validate {
        /// JSON-lines input file (stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Schema file (built-in campaign-ad schema when omitted)
        #[arg(long)]
        schema: Option<PathBuf>,
    },

    /// Print the active schema as JSON
    Schema {
        /// Schema file (built-in campaign-ad schema when omitted)
        #[arg(long)]
        schema: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
