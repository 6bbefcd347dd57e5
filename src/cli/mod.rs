//! CLI module for lexidb
//!
//! Provides the command-line interface:
//! - init: create the data directory
//! - start: boot the repository and serve HTTP
//! - analyze: one-shot analysis of a value

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{analyze, init, run_command, start, Config};
pub use errors::{CliError, CliResult};

/// Parse arguments and run the selected command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}
