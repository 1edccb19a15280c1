//! Hub Registry Tests
//!
//! Tests for hub isolation and concurrent access:
//! - Hubs never see each other's documents or indexes
//! - Concurrent writers on distinct hubs do not interfere
//! - Concurrent readers never observe half-applied index maintenance
//! - Master keys are write-once

use std::sync::Arc;
use std::thread;

use hubvault::hub::{HubConfig, HubRegistry, MasterKeyOutcome};
use hubvault::query::Query;
use hubvault::store::{Attribute, Document, ErrorKind, IndexEntry, IndexPolicy};
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

fn doc(id: &str, pairs: &[(&str, &str)]) -> Document {
    let attributes = pairs
        .iter()
        .map(|(name, value)| Attribute::new(*name, *value))
        .collect();

    Document::new(id).with_entry(IndexEntry::new("hmac-1", attributes))
}

fn red() -> Query {
    Query::new("hmac-1").equals([("color", "red")])
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

/// Created hubs resolve; removed hubs are NotFound.
#[test]
fn test_create_get_remove() {
    let registry = HubRegistry::new();
    let id = registry.create(HubConfig::new("did:ex:alice")).unwrap();

    assert_eq!(registry.get(id.as_str()).unwrap().id(), &id);

    registry.remove(id.as_str()).unwrap();
    let err = registry.get(id.as_str()).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

/// A controller cannot reuse a reference id; other controllers can.
#[test]
fn test_reference_ids_scoped_to_controller() {
    let registry = HubRegistry::new();
    registry
        .create(HubConfig::new("did:ex:alice").with_reference_id("primary"))
        .unwrap();

    let err = registry
        .create(HubConfig::new("did:ex:alice").with_reference_id("primary"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    assert!(registry
        .create(HubConfig::new("did:ex:bob").with_reference_id("primary"))
        .is_ok());
    assert_eq!(registry.len(), 2);
}

/// Hubs inherit the registry policy unless they pin their own.
#[test]
fn test_policy_inheritance() {
    let registry = HubRegistry::with_policy(IndexPolicy::Legacy);
    let inherited = registry.create(HubConfig::new("did:ex:alice")).unwrap();
    let pinned = registry
        .create(HubConfig::new("did:ex:bob").with_policy(IndexPolicy::Targeted))
        .unwrap();

    let inherited = registry.get(inherited.as_str()).unwrap();
    let pinned = registry.get(pinned.as_str()).unwrap();
    assert_eq!(inherited.info().index_policy, IndexPolicy::Legacy);
    assert_eq!(pinned.info().index_policy, IndexPolicy::Targeted);
}

/// A handle resolved before removal stays usable.
#[test]
fn test_removed_hub_handle_stays_usable() {
    let registry = HubRegistry::new();
    let id = registry.create(HubConfig::new("did:ex:alice")).unwrap();
    let hub = registry.get(id.as_str()).unwrap();

    registry.remove(id.as_str()).unwrap();

    hub.create_document(doc("d1", &[("color", "red")])).unwrap();
    assert_eq!(hub.query(&red()).unwrap().len(), 1);
}

// =============================================================================
// Isolation Tests
// =============================================================================

/// Documents and indexes are per hub.
#[test]
fn test_hubs_are_isolated() {
    let registry = HubRegistry::new();
    let a_id = registry.create(HubConfig::new("did:ex:alice")).unwrap();
    let b_id = registry.create(HubConfig::new("did:ex:bob")).unwrap();
    let a = registry.get(a_id.as_str()).unwrap();
    let b = registry.get(b_id.as_str()).unwrap();

    a.create_document(doc("d1", &[("color", "red")])).unwrap();
    b.create_document(doc("d1", &[("color", "blue")])).unwrap();

    assert_eq!(a.query(&red()).unwrap().len(), 1);
    assert!(b.query(&red()).unwrap().is_empty());

    let other_index = Query::new("hmac-1").has(["color"]);
    b.delete_document("d1").unwrap();
    assert!(b.query(&other_index).unwrap().is_empty());
    assert_eq!(a.query(&other_index).unwrap().len(), 1);
}

/// Master keys are write-once and NotFound until set.
#[test]
fn test_master_key_write_once() {
    let registry = HubRegistry::new();
    let hub = registry
        .get(registry.create(HubConfig::new("did:ex:alice")).unwrap().as_str())
        .unwrap();

    assert_eq!(hub.master_key().unwrap_err().kind(), ErrorKind::NotFound);

    assert_eq!(hub.put_master_key(json!({"kid": "k1"})), MasterKeyOutcome::Stored);
    assert_eq!(hub.put_master_key(json!({"kid": "k2"})), MasterKeyOutcome::AlreadySet);
    assert_eq!(hub.master_key().unwrap(), json!({"kid": "k1"}));
}

// =============================================================================
// Concurrency Tests
// =============================================================================

/// Writers on distinct hubs run in parallel without interference.
#[test]
fn test_concurrent_writers_on_distinct_hubs() {
    let registry = Arc::new(HubRegistry::new());

    let handles: Vec<_> = (0..4)
        .map(|n| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let id = registry
                    .create(HubConfig::new(format!("did:ex:{}", n)))
                    .unwrap();
                let hub = registry.get(id.as_str()).unwrap();
                for i in 0..50 {
                    hub.create_document(doc(&format!("d{}", i), &[("color", "red")]))
                        .unwrap();
                }
                id
            })
        })
        .collect();

    let ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for id in ids {
        let hub = registry.get(id.as_str()).unwrap();
        assert_eq!(hub.document_count(), 50);
        assert_eq!(hub.query(&red()).unwrap().len(), 50);
    }
    assert_eq!(registry.metrics().snapshot().documents_created, 200);
}

/// Readers only ever see a document fully indexed under one value.
#[test]
fn test_readers_never_see_partial_updates() {
    let registry = Arc::new(HubRegistry::new());
    let id = registry.create(HubConfig::new("did:ex:alice")).unwrap();
    let hub = registry.get(id.as_str()).unwrap();
    hub.create_document(doc("d1", &[("color", "red"), ("shade", "red")]))
        .unwrap();

    let writer = {
        let hub = Arc::clone(&hub);
        thread::spawn(move || {
            for i in 0..200 {
                let color = if i % 2 == 0 { "blue" } else { "red" };
                hub.update_document("d1", doc("d1", &[("color", color), ("shade", color)]))
                    .unwrap();
            }
        })
    };

    let reader = {
        let hub = Arc::clone(&hub);
        thread::spawn(move || {
            for _ in 0..200 {
                let both = Query::new("hmac-1")
                    .equals([("color", "red")])
                    .equals([("color", "blue")]);
                let found = hub.query(&both).unwrap();
                assert_eq!(found.len(), 1);

                let consistent = Query::new("hmac-1")
                    .equals([("color", "red"), ("shade", "red")])
                    .equals([("color", "blue"), ("shade", "blue")]);
                assert_eq!(hub.query(&consistent).unwrap().len(), 1);
            }
        })
    };

    writer.join().unwrap();
    reader.join().unwrap();
}
