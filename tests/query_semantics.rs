//! Query Semantics Tests
//!
//! Tests for query evaluation:
//! - Pairs within an equals-clause are conjunctive
//! - Equals-clauses are unioned without duplicates
//! - The has list is one conjunction
//! - Unknown index identifiers are NotFound
//! - Evaluation never mutates the store

use hubvault::query::{Query, QueryEngine};
use hubvault::store::{Attribute, Document, DocumentStore, ErrorKind, IndexEntry, IndexPolicy};

// =============================================================================
// Helper Functions
// =============================================================================

const INDEX: &str = "hmac-1";

fn doc(id: &str, pairs: &[(&str, &str)]) -> Document {
    let attributes = pairs
        .iter()
        .map(|(name, value)| Attribute::new(*name, *value))
        .collect();

    Document::new(id).with_entry(IndexEntry::new(INDEX, attributes))
}

/// A `{color: red, size: m}`, B `{color: red, size: l}`, C `{color: blue}`
fn fixture() -> DocumentStore {
    let mut store = DocumentStore::default();
    store.create(doc("A", &[("color", "red"), ("size", "m")])).unwrap();
    store.create(doc("B", &[("color", "red"), ("size", "l")])).unwrap();
    store.create(doc("C", &[("color", "blue")])).unwrap();
    store
}

fn ids(store: &DocumentStore, query: &Query) -> Vec<String> {
    QueryEngine::evaluate(store, query)
        .unwrap()
        .into_iter()
        .map(|d| d.id.clone())
        .collect()
}

// =============================================================================
// Equals Tests
// =============================================================================

/// Every pair of a clause must match.
#[test]
fn test_equals_clause_is_conjunctive() {
    let store = fixture();
    let query = Query::new(INDEX).equals([("color", "red"), ("size", "m")]);
    assert_eq!(ids(&store, &query), vec!["A"]);
}

/// A single pair returns every holder.
#[test]
fn test_single_pair_returns_all_holders() {
    let store = fixture();
    let query = Query::new(INDEX).equals([("color", "red")]);
    assert_eq!(ids(&store, &query), vec!["A", "B"]);
}

/// Clauses are unioned in order.
#[test]
fn test_equals_clauses_are_unioned() {
    let store = fixture();
    let query = Query::new(INDEX)
        .equals([("color", "blue")])
        .equals([("color", "red")]);
    assert_eq!(ids(&store, &query), vec!["C", "A", "B"]);
}

/// Overlapping clauses yield each document once.
#[test]
fn test_overlapping_clauses_deduplicated() {
    let store = fixture();
    let query = Query::new(INDEX)
        .equals([("color", "red")])
        .equals([("size", "m")]);
    assert_eq!(ids(&store, &query), vec!["A", "B"]);
}

/// A pair nobody holds empties the clause.
#[test]
fn test_unheld_pair_empties_clause() {
    let store = fixture();
    let query = Query::new(INDEX).equals([("color", "red"), ("size", "xl")]);
    assert!(ids(&store, &query).is_empty());
}

// =============================================================================
// Has Tests
// =============================================================================

/// Has on one name returns every document carrying it.
#[test]
fn test_has_single_name() {
    let store = fixture();
    assert_eq!(ids(&store, &Query::new(INDEX).has(["size"])), vec!["A", "B"]);
}

/// Has names are conjunctive.
#[test]
fn test_has_names_are_conjunctive() {
    let store = fixture();
    let query = Query::new(INDEX).has(["color", "size"]);
    assert_eq!(ids(&store, &query), vec!["A", "B"]);
}

/// Has on an unknown name matches nothing.
#[test]
fn test_has_unknown_name() {
    let store = fixture();
    assert!(ids(&store, &Query::new(INDEX).has(["nonexistent"])).is_empty());
}

/// Has results are appended after equals results without dedup.
#[test]
fn test_has_appended_after_equals() {
    let store = fixture();
    let query = Query::new(INDEX).equals([("color", "blue")]).has(["size"]);
    assert_eq!(ids(&store, &query), vec!["C", "A", "B"]);

    let overlapping = Query::new(INDEX).equals([("size", "m")]).has(["size"]);
    assert_eq!(ids(&store, &overlapping), vec!["A", "A", "B"]);
}

/// No clauses, no results.
#[test]
fn test_empty_query_matches_nothing() {
    let store = fixture();
    assert!(ids(&store, &Query::new(INDEX)).is_empty());
}

// =============================================================================
// Index Resolution Tests
// =============================================================================

/// Unknown index is NotFound even on an empty store.
#[test]
fn test_unknown_index_not_found() {
    let empty = DocumentStore::default();
    let err = QueryEngine::evaluate(&empty, &Query::new("nope")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let store = fixture();
    let err = QueryEngine::evaluate(&store, &Query::new("nope").has(["color"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

/// Attributes under another index are invisible.
#[test]
fn test_indexes_are_isolated() {
    let mut store = fixture();
    store
        .create(Document::new("D").with_entry(IndexEntry::new(
            "hmac-2",
            vec![Attribute::new("color", "red")],
        )))
        .unwrap();

    let query = Query::new(INDEX).equals([("color", "red")]);
    assert_eq!(ids(&store, &query), vec!["A", "B"]);
}

/// An index group outlives the documents that created it.
#[test]
fn test_index_group_survives_deletes() {
    let mut store = fixture();
    for id in ["A", "B", "C"] {
        store.delete(id).unwrap();
    }

    let query = Query::new(INDEX).equals([("color", "red")]);
    assert!(ids(&store, &query).is_empty());
}

// =============================================================================
// Consistency Tests
// =============================================================================

/// Queries see the current version of an updated document.
#[test]
fn test_query_reflects_update() {
    let mut store = fixture();
    store
        .update("A", doc("A", &[("color", "blue"), ("size", "m")]))
        .unwrap();

    assert_eq!(ids(&store, &Query::new(INDEX).equals([("color", "red")])), vec!["B"]);
    // A rejoins the blue entry after C
    assert_eq!(
        ids(&store, &Query::new(INDEX).equals([("color", "blue")])),
        vec!["C", "A"]
    );
}

/// Under the legacy policy, stale keys still resolve to the current version.
#[test]
fn test_legacy_stale_key_resolves_current_document() {
    let mut store = DocumentStore::new(IndexPolicy::Legacy);
    store.create(doc("A", &[("color", "red")])).unwrap();
    store.update("A", doc("A", &[("color", "blue")])).unwrap();

    let found = QueryEngine::evaluate(&store, &Query::new(INDEX).equals([("color", "red")]))
        .unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].indexed[0].attributes[0].value, "blue");
}

/// Holders of one key come back in the order they were stored, not by id.
#[test]
fn test_results_follow_storage_order() {
    let mut store = DocumentStore::default();
    store.create(doc("zeta", &[("color", "red")])).unwrap();
    store.create(doc("alpha", &[("color", "red")])).unwrap();

    let query = Query::new(INDEX).equals([("color", "red")]);
    assert_eq!(ids(&store, &query), vec!["zeta", "alpha"]);
    assert_eq!(ids(&store, &Query::new(INDEX).has(["color"])), vec!["zeta", "alpha"]);
}

/// Evaluation does not change the store.
#[test]
fn test_evaluation_is_read_only() {
    let store = fixture();
    let before: Vec<String> = store.index_ids().map(|id| id.to_string()).collect();

    let _ = QueryEngine::evaluate(&store, &Query::new(INDEX).equals([("color", "red")]));
    let _ = QueryEngine::evaluate(&store, &Query::new("nope"));

    let after: Vec<String> = store.index_ids().map(|id| id.to_string()).collect();
    assert_eq!(before, after);
    assert_eq!(store.len(), 3);
}
