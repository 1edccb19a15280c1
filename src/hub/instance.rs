//! A single hub: one document store behind one lock
//!
//! Writes take the write lock for the whole index maintenance pass, reads
//! and queries take the read lock, so no reader ever sees a document whose
//! indexes are half-applied. Hubs never share a lock.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::query::{Query, QueryEngine};
use crate::store::{Document, DocumentStore, IndexPolicy, StoreError, StoreResult, WriteReceipt};

use super::config::{HubConfig, HubId};

/// Result of storing a master key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MasterKeyOutcome {
    /// The key was stored
    Stored,
    /// A key was already present and was left untouched
    AlreadySet,
}

/// Serializable summary of a hub
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HubInfo {
    pub id: HubId,
    pub controller: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    pub index_policy: IndexPolicy,
    pub created_at: DateTime<Utc>,
    pub documents: usize,
    pub indexes: usize,
}

struct HubState {
    store: DocumentStore,
    master_key: Option<Value>,
}

/// A named collection of encrypted documents with its own indexes
pub struct Hub {
    id: HubId,
    config: HubConfig,
    created_at: DateTime<Utc>,
    state: RwLock<HubState>,
    metrics: Arc<MetricsRegistry>,
}

impl Hub {
    pub(crate) fn new(
        id: HubId,
        config: HubConfig,
        default_policy: IndexPolicy,
        metrics: Arc<MetricsRegistry>,
    ) -> Self {
        let policy = config.index_policy.unwrap_or(default_policy);
        Self {
            id,
            config,
            created_at: Utc::now(),
            state: RwLock::new(HubState {
                store: DocumentStore::new(policy),
                master_key: None,
            }),
            metrics,
        }
    }

    pub fn id(&self) -> &HubId {
        &self.id
    }

    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Summary of the hub and its current size
    pub fn info(&self) -> HubInfo {
        let state = self.read();
        HubInfo {
            id: self.id.clone(),
            controller: self.config.controller.clone(),
            reference_id: self.config.reference_id.clone(),
            index_policy: state.store.policy(),
            created_at: self.created_at,
            documents: state.store.len(),
            indexes: state.store.index_ids().count(),
        }
    }

    /// Insert a new document
    pub fn create_document(&self, doc: Document) -> StoreResult<()> {
        let doc_id = doc.id.clone();
        let result = self.write().store.create(doc);
        self.record_write(Event::DocumentCreated, &doc_id, result)?;
        self.metrics.increment_documents_created();
        Ok(())
    }

    /// Replace the document addressed by `id`
    pub fn update_document(&self, id: &str, doc: Document) -> StoreResult<()> {
        let result = self.write().store.update(id, doc);
        self.record_write(Event::DocumentUpdated, id, result)?;
        self.metrics.increment_documents_updated();
        Ok(())
    }

    /// Fetch a copy of a stored document
    pub fn get_document(&self, id: &str) -> StoreResult<Document> {
        self.read().store.get(id).cloned()
    }

    /// Delete a document, returning it
    pub fn delete_document(&self, id: &str) -> StoreResult<Document> {
        let result = self.write().store.delete(id);
        match result {
            Ok(doc) => {
                self.metrics.increment_documents_deleted();
                log_event_with_fields(
                    Event::DocumentDeleted,
                    &[("hub", self.id.as_str()), ("document", id)],
                );
                Ok(doc)
            }
            Err(err) => Err(self.reject_write(id, err)),
        }
    }

    /// Evaluate a query, returning copies of the matching documents
    pub fn query(&self, query: &Query) -> StoreResult<Vec<Document>> {
        let result = {
            let state = self.read();
            QueryEngine::evaluate(&state.store, query)
                .map(|docs| docs.into_iter().cloned().collect::<Vec<_>>())
        };

        match result {
            Ok(docs) => {
                self.metrics.increment_queries_executed();
                let count = docs.len().to_string();
                log_event_with_fields(
                    Event::QueryExecuted,
                    &[
                        ("hub", self.id.as_str()),
                        ("index", query.index.as_str()),
                        ("results", count.as_str()),
                    ],
                );
                Ok(docs)
            }
            Err(err) => {
                self.metrics.increment_queries_rejected();
                log_event_with_fields(
                    Event::QueryRejected,
                    &[
                        ("code", err.code()),
                        ("hub", self.id.as_str()),
                        ("index", query.index.as_str()),
                    ],
                );
                Err(err)
            }
        }
    }

    /// Store the hub's master key if none is set yet
    pub fn put_master_key(&self, key: Value) -> MasterKeyOutcome {
        let mut state = self.write();
        if state.master_key.is_some() {
            return MasterKeyOutcome::AlreadySet;
        }
        state.master_key = Some(key);
        drop(state);

        log_event_with_fields(Event::MasterKeyStored, &[("hub", self.id.as_str())]);
        MasterKeyOutcome::Stored
    }

    /// The stored master key
    pub fn master_key(&self) -> StoreResult<Value> {
        self.read()
            .master_key
            .clone()
            .ok_or_else(|| StoreError::MasterKeyNotFound(self.id.to_string()))
    }

    /// Number of stored documents
    pub fn document_count(&self) -> usize {
        self.read().store.len()
    }

    /// Run `f` against the store under the read lock
    pub fn with_store<R>(&self, f: impl FnOnce(&DocumentStore) -> R) -> R {
        f(&self.read().store)
    }

    fn read(&self) -> RwLockReadGuard<'_, HubState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HubState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Log and count the outcome of a create/update
    fn record_write(
        &self,
        event: Event,
        doc_id: &str,
        result: StoreResult<WriteReceipt>,
    ) -> StoreResult<()> {
        let receipt = result.map_err(|err| self.reject_write(doc_id, err))?;

        for eviction in &receipt.evictions {
            log_event_with_fields(
                Event::UniqueEviction,
                &[
                    ("evicted", eviction.document_id.as_str()),
                    ("hub", self.id.as_str()),
                    ("index", eviction.index.as_str()),
                    ("writer", doc_id),
                ],
            );
        }
        self.metrics
            .add_unique_evictions(receipt.evictions.len() as u64);

        log_event_with_fields(event, &[("hub", self.id.as_str()), ("document", doc_id)]);
        Ok(())
    }

    fn reject_write(&self, doc_id: &str, err: StoreError) -> StoreError {
        self.metrics.increment_writes_rejected();
        log_event_with_fields(
            Event::WriteRejected,
            &[
                ("code", err.code()),
                ("document", doc_id),
                ("hub", self.id.as_str()),
            ],
        );
        err
    }
}
