//! Structured attribute queries

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::index::IndexId;

/// One equals-clause: every `name -> value` pair must match
pub type EqualsClause = BTreeMap<String, String>;

/// A query against one index group of a store.
///
/// Equals-clauses are OR-ed together, pairs inside one clause are AND-ed.
/// The has list is a single AND over attribute names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub index: IndexId,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub equals: Vec<EqualsClause>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub has: Vec<String>,
}

impl Query {
    /// Query with no clauses; matches nothing until clauses are added
    pub fn new(index: impl Into<IndexId>) -> Self {
        Self {
            index: index.into(),
            equals: Vec::new(),
            has: Vec::new(),
        }
    }

    /// Builder: append an equals-clause
    pub fn equals<I, N, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        self.equals.push(
            pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        );
        self
    }

    /// Builder: append attribute names to the has list
    pub fn has<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.has.extend(names.into_iter().map(Into::into));
        self
    }
}
