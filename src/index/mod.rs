//! Attribute indexes for hubvault
//!
//! Indexes are derived, in-memory-only state maintained by the document
//! store on every write.
//!
//! # Design Principles
//!
//! - Derived state: indexes mirror the primary document map
//! - In-memory only: no persistence
//! - Deterministic: BTreeMap keys, document ids in insertion order
//!
//! # Invariants
//!
//! - A unique `name=value` entry holds at most one document
//! - An entry with no documents is indistinguishable from an absent one

mod attribute;
mod group;

pub use attribute::{equals_key, AttributeIndex, DocumentId};
pub use group::{IndexGroup, IndexId};
