//! Hub configuration

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{IndexPolicy, StoreError, StoreResult};

/// Registry-assigned hub identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HubId(String);

impl HubId {
    /// Fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HubId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for HubId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HubId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Configuration supplied when a hub is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubConfig {
    /// Owner of the hub (required, non-empty)
    pub controller: String,

    /// Caller-chosen name, unique per controller (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,

    /// Overrides the registry's default maintenance policy (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_policy: Option<IndexPolicy>,
}

impl HubConfig {
    /// Config with only a controller
    pub fn new(controller: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            reference_id: None,
            index_policy: None,
        }
    }

    /// Builder: set the reference id
    pub fn with_reference_id(mut self, reference_id: impl Into<String>) -> Self {
        self.reference_id = Some(reference_id.into());
        self
    }

    /// Builder: pin the maintenance policy
    pub fn with_policy(mut self, policy: IndexPolicy) -> Self {
        self.index_policy = Some(policy);
        self
    }

    /// Reject blank controllers and blank reference ids
    pub fn validate(&self) -> StoreResult<()> {
        if self.controller.trim().is_empty() {
            return Err(StoreError::InvalidHubConfig(
                "controller cannot be empty".to_string(),
            ));
        }

        if let Some(reference_id) = &self.reference_id {
            if reference_id.trim().is_empty() {
                return Err(StoreError::InvalidHubConfig(
                    "referenceId cannot be empty when present".to_string(),
                ));
            }
        }

        Ok(())
    }
}
