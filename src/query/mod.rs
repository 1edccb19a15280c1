//! Attribute queries for hubvault
//!
//! A query names one index group and combines equals-clauses (exact
//! `name=value` matches) with a has list (attribute presence). Evaluation is
//! read-only and deterministic for a given store state.

mod clause;
mod engine;

pub use clause::{EqualsClause, Query};
pub use engine::QueryEngine;
