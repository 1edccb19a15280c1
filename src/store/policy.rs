//! Index maintenance policy

use std::fmt;

use serde::{Deserialize, Serialize};

/// How deletes and updates retract index entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexPolicy {
    /// Delete removes only the deleted document from each entry it touched;
    /// update retracts the previous version's attributes before re-indexing.
    #[default]
    Targeted,
    /// Delete drops every key the document contributed, together with any
    /// other document sharing it; update never retracts dropped attributes.
    Legacy,
}

impl IndexPolicy {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexPolicy::Targeted => "targeted",
            IndexPolicy::Legacy => "legacy",
        }
    }
}

impl fmt::Display for IndexPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
