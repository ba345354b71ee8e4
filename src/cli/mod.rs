//! CLI module
//!
//! Provides command-line interface for:
//! - serve: Load the dataset and serve the HTTP API
//! - check: Validate a dataset file and report its size

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, resolve_config, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_json;
