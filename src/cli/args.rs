//! CLI argument definitions using clap
//!
//! Commands:
//! - hubvault serve [--config <path>]
//! - hubvault check-config [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// hubvault - in-memory encrypted document hubs with blinded attribute indexes
#[derive(Parser, Debug)]
#[command(name = "hubvault")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve JSON requests from stdin, one per line, until EOF
    Serve {
        /// Path to configuration file (./hubvault.json is used if present)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate a configuration file and print it with defaults applied
    CheckConfig {
        /// Path to configuration file
        #[arg(long, default_value = "./hubvault.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
