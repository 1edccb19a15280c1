//! Attribute index
//!
//! An attribute index maps a composite string key to the documents holding
//! it. Keys are ordered; documents under one key are kept in the order they
//! were first added, so lookups return them first-come first-served.

use std::collections::BTreeMap;

/// Document identifier as stored in the primary map and in every index entry.
pub type DocumentId = String;

/// Builds the equals-index key for an attribute pair.
pub fn equals_key(name: &str, value: &str) -> String {
    let mut key = String::with_capacity(name.len() + value.len() + 1);
    key.push_str(name);
    key.push('=');
    key.push_str(value);
    key
}

/// A single-key-to-document-set mapping.
#[derive(Debug, Clone, Default)]
pub struct AttributeIndex {
    /// Maps composite keys to the ids holding them, in insertion order, without repeats
    entries: BTreeMap<String, Vec<DocumentId>>,
}

impl AttributeIndex {
    /// Creates a new empty attribute index
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Insert a document under a key.
    ///
    /// Re-adding a held document keeps its position. With `unique` set, every
    /// other holder of the key is cleared first so the entry holds exactly
    /// this document afterwards. Returns the ids that were evicted, never
    /// including `doc_id` itself.
    pub fn add(&mut self, key: &str, doc_id: &str, unique: bool) -> Vec<DocumentId> {
        let docs = self.entries.entry(key.to_string()).or_default();

        let mut evicted = Vec::new();
        if unique {
            evicted = std::mem::take(docs)
                .into_iter()
                .filter(|held| held != doc_id)
                .collect();
        }

        if !docs.iter().any(|held| held == doc_id) {
            docs.push(doc_id.to_string());
        }
        evicted
    }

    /// Remove the whole entry at `key`, whoever holds it.
    ///
    /// Returns the ids that were held.
    pub fn remove(&mut self, key: &str) -> Vec<DocumentId> {
        self.entries.remove(key).unwrap_or_default()
    }

    /// Remove one document from the entry at `key`.
    ///
    /// If the key has no more documents, removes the key entirely.
    pub fn remove_document(&mut self, key: &str, doc_id: &str) -> bool {
        let Some(docs) = self.entries.get_mut(key) else {
            return false;
        };

        let before = docs.len();
        docs.retain(|held| held != doc_id);
        let removed = docs.len() != before;

        if docs.is_empty() {
            self.entries.remove(key);
        }
        removed
    }

    /// Lookup all documents for an exact key match.
    ///
    /// Returns ids in insertion order; an absent key yields an empty vec.
    pub fn find(&self, key: &str) -> Vec<&DocumentId> {
        self.entries
            .get(key)
            .map(|docs| docs.iter().collect())
            .unwrap_or_default()
    }

    /// Whether `doc_id` is held under `key`
    pub fn contains(&self, key: &str, doc_id: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|docs| docs.iter().any(|held| held == doc_id))
    }

    /// Whether any document is held under `key`
    pub fn is_occupied(&self, key: &str) -> bool {
        self.entries.get(key).is_some_and(|docs| !docs.is_empty())
    }

    /// Returns the number of distinct keys
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    /// Returns the total number of (key, document) pairs
    pub fn document_count(&self) -> usize {
        self.entries.values().map(|docs| docs.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equals_key_format() {
        assert_eq!(equals_key("color", "red"), "color=red");
        assert_eq!(equals_key("", ""), "=");
    }

    #[test]
    fn test_add_and_find() {
        let mut index = AttributeIndex::new();

        index.add("color=red", "doc_b", false);
        index.add("color=red", "doc_a", false);
        index.add("color=blue", "doc_c", false);

        assert_eq!(index.find("color=red"), vec!["doc_b", "doc_a"]);
        assert_eq!(index.find("color=blue"), vec!["doc_c"]);
        assert!(index.find("color=green").is_empty());
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut index = AttributeIndex::new();

        index.add("color", "doc_a", false);
        index.add("color", "doc_a", false);

        assert_eq!(index.document_count(), 1);
    }

    #[test]
    fn test_re_add_keeps_first_position() {
        let mut index = AttributeIndex::new();

        index.add("color", "zeta", false);
        index.add("color", "alpha", false);
        index.add("color", "zeta", false);

        assert_eq!(index.find("color"), vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_unique_add_clears_existing_holders() {
        let mut index = AttributeIndex::new();

        index.add("email=x", "doc_a", false);
        index.add("email=x", "doc_b", false);
        let evicted = index.add("email=x", "doc_c", true);

        assert_eq!(evicted, vec!["doc_a".to_string(), "doc_b".to_string()]);
        assert_eq!(index.find("email=x"), vec!["doc_c"]);
    }

    #[test]
    fn test_unique_re_add_does_not_report_self() {
        let mut index = AttributeIndex::new();

        index.add("email=x", "doc_a", true);
        let evicted = index.add("email=x", "doc_a", true);

        assert!(evicted.is_empty());
        assert_eq!(index.find("email=x"), vec!["doc_a"]);
    }

    #[test]
    fn test_remove_drops_whole_key() {
        let mut index = AttributeIndex::new();

        index.add("size", "doc_a", false);
        index.add("size", "doc_b", false);

        let removed = index.remove("size");
        assert_eq!(removed.len(), 2);
        assert!(index.find("size").is_empty());
        assert_eq!(index.key_count(), 0);
    }

    #[test]
    fn test_remove_document_is_targeted() {
        let mut index = AttributeIndex::new();

        index.add("size", "doc_a", false);
        index.add("size", "doc_b", false);

        assert!(index.remove_document("size", "doc_a"));
        assert_eq!(index.find("size"), vec!["doc_b"]);

        // Remove last document, key should be removed
        assert!(index.remove_document("size", "doc_b"));
        assert_eq!(index.key_count(), 0);

        assert!(!index.remove_document("size", "doc_b"));
    }

    #[test]
    fn test_contains_and_occupied() {
        let mut index = AttributeIndex::new();
        index.add("color=red", "doc_a", false);

        assert!(index.contains("color=red", "doc_a"));
        assert!(!index.contains("color=red", "doc_b"));
        assert!(index.is_occupied("color=red"));
        assert!(!index.is_occupied("color=blue"));
    }
}
