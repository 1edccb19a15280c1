//! CLI errors
//!
//! Every variant ends the process with a non-zero exit code. Configuration
//! and boot failures happen before the first request is read.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read config {}: {source}", .path.display())]
    ConfigUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config is not valid JSON: {0}")]
    ConfigSyntax(#[source] serde_json::Error),

    #[error("config rejected: hubs[{position}]: {reason}")]
    ConfigRejected { position: usize, reason: String },

    #[error("configured hub could not be created: {0}")]
    HubBoot(#[from] StoreError),

    #[error("request stream failed: {0}")]
    Stream(#[from] io::Error),

    #[error("output encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl CliError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigUnreadable { .. }
            | Self::ConfigSyntax(_)
            | Self::ConfigRejected { .. } => "HUB_CLI_CONFIG_ERROR",
            Self::HubBoot(_) => "HUB_CLI_BOOT_FAILED",
            Self::Stream(_) | Self::Encoding(_) => "HUB_CLI_IO_ERROR",
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
