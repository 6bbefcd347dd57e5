//! CLI argument definitions using clap
//!
//! Commands:
//! - lexidb init --config <path>
//! - lexidb start --config <path>
//! - lexidb analyze <value>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// lexidb - A content-addressed string analysis and query service
#[derive(Parser, Debug)]
#[command(name = "lexidb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize the data directory
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./lexidb.json")]
        config: PathBuf,
    },

    /// Start the HTTP server
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./lexidb.json")]
        config: PathBuf,
    },

    /// Analyze a single value and print its properties, without storing it
    Analyze {
        /// The string to analyze
        value: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
