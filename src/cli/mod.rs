//! CLI module for hubvault
//!
//! Provides command-line interface for:
//! - serve: Boot the registry and answer JSON requests on stdin/stdout
//! - check-config: Validate a configuration file

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{boot, check_config, run, run_command, serve, serve_lines, DEFAULT_CONFIG_PATH};
pub use config::Config;
pub use errors::{CliError, CliResult};
pub use io::{read_requests, write_json};
