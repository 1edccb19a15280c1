//! Hub registry
//!
//! Maps hub ids to hubs. The map lock is only held to resolve, insert or
//! remove an `Arc<Hub>`; document operations run under each hub's own lock,
//! so distinct hubs never contend.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::observability::{log_event_with_fields, Event, MetricsRegistry};
use crate::store::{IndexPolicy, StoreError, StoreResult};

use super::config::{HubConfig, HubId};
use super::instance::Hub;

/// Registry of live hubs
pub struct HubRegistry {
    hubs: RwLock<HashMap<HubId, Arc<Hub>>>,
    default_policy: IndexPolicy,
    metrics: Arc<MetricsRegistry>,
}

impl Default for HubRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HubRegistry {
    /// Empty registry using the targeted maintenance policy
    pub fn new() -> Self {
        Self::with_policy(IndexPolicy::default())
    }

    /// Empty registry whose hubs default to `policy`
    pub fn with_policy(policy: IndexPolicy) -> Self {
        Self {
            hubs: RwLock::new(HashMap::new()),
            default_policy: policy,
            metrics: Arc::new(MetricsRegistry::new()),
        }
    }

    /// Register a new hub.
    ///
    /// Fails with a validation error for a bad config and with a conflict
    /// when the controller already owns a hub with the same reference id.
    pub fn create(&self, config: HubConfig) -> StoreResult<HubId> {
        config.validate()?;

        let mut hubs = self.hubs.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(reference_id) = &config.reference_id {
            let taken = hubs.values().any(|hub| {
                hub.config().controller == config.controller
                    && hub.config().reference_id.as_ref() == Some(reference_id)
            });
            if taken {
                return Err(StoreError::DuplicateHub {
                    controller: config.controller.clone(),
                    reference_id: reference_id.clone(),
                });
            }
        }

        let id = HubId::generate();
        let hub = Hub::new(
            id.clone(),
            config,
            self.default_policy,
            Arc::clone(&self.metrics),
        );
        let policy = hub.info().index_policy;
        hubs.insert(id.clone(), Arc::new(hub));
        drop(hubs);

        self.metrics.increment_hubs_created();
        log_event_with_fields(
            Event::HubCreated,
            &[("hub", id.as_str()), ("policy", policy.as_str())],
        );
        Ok(id)
    }

    /// Resolve a hub id
    pub fn get(&self, id: &str) -> StoreResult<Arc<Hub>> {
        self.hubs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::HubNotFound(id.to_string()))
    }

    /// Tear down a hub; handles already resolved stay usable until dropped
    pub fn remove(&self, id: &str) -> StoreResult<Arc<Hub>> {
        let removed = self
            .hubs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .ok_or_else(|| StoreError::HubNotFound(id.to_string()))?;

        self.metrics.increment_hubs_removed();
        log_event_with_fields(Event::HubRemoved, &[("hub", id)]);
        Ok(removed)
    }

    /// Look a hub up by its controller and reference id
    pub fn find_by_reference(&self, controller: &str, reference_id: &str) -> Option<Arc<Hub>> {
        self.hubs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .find(|hub| {
                hub.config().controller == controller
                    && hub.config().reference_id.as_deref() == Some(reference_id)
            })
            .cloned()
    }

    /// Ids of every live hub, ascending
    pub fn list(&self) -> Vec<HubId> {
        let mut ids: Vec<HubId> = self
            .hubs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.hubs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Counters shared by every hub of this registry
    pub fn metrics(&self) -> &Arc<MetricsRegistry> {
        &self.metrics
    }
}
