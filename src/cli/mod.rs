//! CLI module for crmgate
//!
//! Provides command-line interface for:
//! - serve: Run the HTTP gateway
//! - translate: One-shot translation of query text
//! - validate: One-shot validation of a structured search body

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{run, run_command, serve, translate, validate};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_input, write_error, write_response};
