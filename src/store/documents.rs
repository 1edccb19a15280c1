//! Document store for one hub
//!
//! Owns the primary id -> document map and every index group, and keeps the
//! two in step on each write.
//!
//! # API
//!
//! - `create(doc)` - Insert a new document, rejecting id and unique conflicts
//! - `update(id, doc)` - Replace (or insert) a document, evicting unique holders
//! - `get(id)` - Fetch a stored document
//! - `delete(id)` - Unindex and remove a document
//!
//! Every failing call returns before touching any state.

use std::collections::{BTreeMap, HashMap};

use crate::index::{equals_key, DocumentId, IndexGroup, IndexId};

use super::document::Document;
use super::errors::{StoreError, StoreResult};
use super::policy::IndexPolicy;

/// A document knocked out of a unique equals entry by a later write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eviction {
    pub index: IndexId,
    pub key: String,
    pub document_id: DocumentId,
}

/// Side effects of a successful write beyond the write itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReceipt {
    pub evictions: Vec<Eviction>,
}

/// Documents and index groups of one hub
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    /// Primary map (id -> document)
    documents: HashMap<DocumentId, Document>,

    /// Index groups, created on first reference and never dropped
    groups: BTreeMap<IndexId, IndexGroup>,

    policy: IndexPolicy,
}

impl DocumentStore {
    /// Creates an empty store with the given maintenance policy
    pub fn new(policy: IndexPolicy) -> Self {
        Self {
            documents: HashMap::new(),
            groups: BTreeMap::new(),
            policy,
        }
    }

    /// Insert a new document.
    ///
    /// Fails with a conflict when the id is taken or when a unique attribute
    /// value is already held in its group. Unlike `update`, creation never
    /// evicts.
    pub fn create(&mut self, doc: Document) -> StoreResult<WriteReceipt> {
        if self.documents.contains_key(&doc.id) {
            return Err(StoreError::DuplicateDocument(doc.id));
        }

        self.check_unique(&doc)?;

        let receipt = self.index_document(&doc);
        self.documents.insert(doc.id.clone(), doc);
        Ok(receipt)
    }

    /// Replace the document stored under `id`, or insert it if absent.
    ///
    /// `id` must equal `doc.id`. No uniqueness pre-check is made: a unique
    /// value held by another document moves to this one.
    pub fn update(&mut self, id: &str, doc: Document) -> StoreResult<WriteReceipt> {
        if id != doc.id {
            return Err(StoreError::IdMismatch {
                expected: id.to_string(),
                actual: doc.id,
            });
        }

        if self.policy == IndexPolicy::Targeted {
            if let Some(previous) = self.documents.get(id) {
                Self::unindex_document(&mut self.groups, self.policy, previous);
            }
        }

        let receipt = self.index_document(&doc);
        self.documents.insert(doc.id.clone(), doc);
        Ok(receipt)
    }

    /// Fetch a stored document
    pub fn get(&self, id: &str) -> StoreResult<&Document> {
        self.documents
            .get(id)
            .ok_or_else(|| StoreError::DocumentNotFound(id.to_string()))
    }

    /// Unindex and remove a document, returning it
    pub fn delete(&mut self, id: &str) -> StoreResult<Document> {
        let Some(doc) = self.documents.get(id) else {
            return Err(StoreError::DocumentNotFound(id.to_string()));
        };

        Self::unindex_document(&mut self.groups, self.policy, doc);

        self.documents
            .remove(id)
            .ok_or_else(|| StoreError::DocumentNotFound(id.to_string()))
    }

    /// Whether a document is stored under `id`
    pub fn contains(&self, id: &str) -> bool {
        self.documents.contains_key(id)
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the store holds no documents
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// The index group for an identifier, if any document ever referenced it
    pub fn group(&self, index: &IndexId) -> Option<&IndexGroup> {
        self.groups.get(index)
    }

    /// Identifiers of every index group, ascending
    pub fn index_ids(&self) -> impl Iterator<Item = &IndexId> {
        self.groups.keys()
    }

    /// The maintenance policy this store runs with
    pub fn policy(&self) -> IndexPolicy {
        self.policy
    }

    /// Reject a creation whose unique attributes are already held
    fn check_unique(&self, doc: &Document) -> StoreResult<()> {
        for (index, attribute) in doc.attributes() {
            if !attribute.is_unique() {
                continue;
            }

            let held = self
                .groups
                .get(index)
                .is_some_and(|group| group.is_held(&attribute.name, &attribute.value));

            if held {
                return Err(StoreError::UniqueConflict {
                    index: index.clone(),
                    key: equals_key(&attribute.name, &attribute.value),
                });
            }
        }
        Ok(())
    }

    /// Add every attribute of `doc` to its group
    fn index_document(&mut self, doc: &Document) -> WriteReceipt {
        let mut receipt = WriteReceipt::default();

        for (index, attribute) in doc.attributes() {
            let group = self.groups.entry(index.clone()).or_default();
            let evicted = group.insert(
                &doc.id,
                &attribute.name,
                &attribute.value,
                attribute.is_unique(),
            );

            receipt
                .evictions
                .extend(evicted.into_iter().map(|document_id| Eviction {
                    index: index.clone(),
                    key: equals_key(&attribute.name, &attribute.value),
                    document_id,
                }));
        }

        receipt
    }

    /// Retract every attribute of `doc` from its group
    fn unindex_document(
        groups: &mut BTreeMap<IndexId, IndexGroup>,
        policy: IndexPolicy,
        doc: &Document,
    ) {
        for (index, attribute) in doc.attributes() {
            let Some(group) = groups.get_mut(index) else {
                continue;
            };

            match policy {
                IndexPolicy::Targeted => {
                    group.remove_document(&doc.id, &attribute.name, &attribute.value)
                }
                IndexPolicy::Legacy => group.remove_keys(&attribute.name, &attribute.value),
            }
        }
    }
}
