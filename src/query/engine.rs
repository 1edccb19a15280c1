//! Query evaluation over index groups
//!
//! Evaluation order is fixed:
//!
//! 1. Equals-clauses, in order. Each clause is a conjunction seeded by its
//!    first pair and narrowed by every further pair, stopping as soon as it
//!    runs dry. Its matches are appended, skipping documents already
//!    collected.
//! 2. The has list, as one conjunction over the has-index. Its matches are
//!    appended as they are, without checking the equals results.
//!
//! Results keep first-seen order. Evaluation never mutates the store.

use std::collections::HashSet;

use crate::index::{equals_key, AttributeIndex, DocumentId};
use crate::store::{Document, DocumentStore, StoreError, StoreResult};

use super::clause::Query;

/// Stateless evaluator for `Query` values
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryEngine;

impl QueryEngine {
    /// Evaluate a query against a store.
    ///
    /// Fails with `IndexNotFound` when no stored document ever referenced the
    /// query's index identifier.
    pub fn evaluate<'s>(store: &'s DocumentStore, query: &Query) -> StoreResult<Vec<&'s Document>> {
        let ids = Self::matching_ids(store, query)?;

        // Ids whose document is gone are skipped
        Ok(ids
            .into_iter()
            .filter_map(|id| store.get(id).ok())
            .collect())
    }

    /// Evaluate a query and return the matching document ids only
    pub fn matching_ids<'s>(
        store: &'s DocumentStore,
        query: &Query,
    ) -> StoreResult<Vec<&'s DocumentId>> {
        let group = store
            .group(&query.index)
            .ok_or_else(|| StoreError::IndexNotFound(query.index.clone()))?;

        let mut results: Vec<&DocumentId> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for clause in &query.equals {
            let keys = clause.iter().map(|(name, value)| equals_key(name, value));
            for id in conjunction(group.equals(), keys) {
                if seen.insert(id.as_str()) {
                    results.push(id);
                }
            }
        }

        if !query.has.is_empty() {
            results.extend(conjunction(group.has(), query.has.iter().cloned()));
        }

        Ok(results)
    }
}

/// Intersect the entries of `keys` in order, short-circuiting on empty.
///
/// The first key seeds the running set; no keys yields no matches.
fn conjunction<I>(index: &AttributeIndex, keys: I) -> Vec<&DocumentId>
where
    I: IntoIterator<Item = String>,
{
    let mut matches: Option<Vec<&DocumentId>> = None;

    for key in keys {
        match matches.as_mut() {
            None => matches = Some(index.find(&key)),
            Some(current) => {
                current.retain(|id| index.contains(&key, id));
                if current.is_empty() {
                    break;
                }
            }
        }
    }

    matches.unwrap_or_default()
}
