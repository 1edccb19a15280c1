//! Configuration file
//!
//! ```json
//! {
//!   "index_policy": "targeted",
//!   "log_level": "info",
//!   "hubs": [{"controller": "did:ex:alice", "referenceId": "primary"}]
//! }
//! ```
//!
//! Every field is optional.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::hub::HubConfig;
use crate::observability::Severity;
use crate::store::IndexPolicy;

use super::errors::{CliError, CliResult};

/// Process configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Maintenance policy for hubs that do not pin their own
    #[serde(default)]
    pub index_policy: IndexPolicy,

    /// Minimum severity written to the log
    #[serde(default)]
    pub log_level: Severity,

    /// Hubs created at boot
    #[serde(default)]
    pub hubs: Vec<HubConfig>,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| CliError::ConfigUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration text
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content).map_err(CliError::ConfigSyntax)?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        let mut references = HashSet::new();

        for (position, hub) in self.hubs.iter().enumerate() {
            hub.validate().map_err(|e| CliError::ConfigRejected {
                position,
                reason: e.to_string(),
            })?;

            if let Some(reference_id) = &hub.reference_id {
                if !references.insert((hub.controller.as_str(), reference_id.as_str())) {
                    return Err(CliError::ConfigRejected {
                        position,
                        reason: format!(
                            "duplicate referenceId '{}' for controller '{}'",
                            reference_id, hub.controller
                        ),
                    });
                }
            }
        }

        Ok(())
    }
}
