//! Index groups
//!
//! Every index identifier supplied with a document selects one group. A group
//! pairs an equals-index keyed by `name=value` with a has-index keyed by
//! `name`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::attribute::{equals_key, AttributeIndex, DocumentId};

/// Opaque identifier of an index namespace, typically an HMAC key id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexId(String);

impl IndexId {
    /// Create an index id from any string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IndexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IndexId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for IndexId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The equals/has index pair of one index namespace.
#[derive(Debug, Clone, Default)]
pub struct IndexGroup {
    equals: AttributeIndex,
    has: AttributeIndex,
}

impl IndexGroup {
    /// Creates an empty group
    pub fn new() -> Self {
        Self::default()
    }

    /// Equality index, keyed by `name=value`
    pub fn equals(&self) -> &AttributeIndex {
        &self.equals
    }

    /// Existence index, keyed by `name`
    pub fn has(&self) -> &AttributeIndex {
        &self.has
    }

    /// Index one attribute of a document.
    ///
    /// Returns the documents evicted from the equals entry by a unique insert.
    pub fn insert(
        &mut self,
        doc_id: &str,
        name: &str,
        value: &str,
        unique: bool,
    ) -> Vec<DocumentId> {
        let evicted = self.equals.add(&equals_key(name, value), doc_id, unique);
        self.has.add(name, doc_id, false);
        evicted
    }

    /// Drop both keys an attribute contributed, for every holder.
    pub fn remove_keys(&mut self, name: &str, value: &str) {
        self.equals.remove(&equals_key(name, value));
        self.has.remove(name);
    }

    /// Drop one document from both keys an attribute contributed.
    pub fn remove_document(&mut self, doc_id: &str, name: &str, value: &str) {
        self.equals.remove_document(&equals_key(name, value), doc_id);
        self.has.remove_document(name, doc_id);
    }

    /// Whether some document already holds `name=value`
    pub fn is_held(&self, name: &str, value: &str) -> bool {
        self.equals.is_occupied(&equals_key(name, value))
    }
}
