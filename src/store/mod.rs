//! Document storage for hubvault
//!
//! A `DocumentStore` is the state of one hub: the primary document map plus
//! the index groups derived from it. It performs no I/O and no locking;
//! callers serialize access (see `hub`).

mod document;
mod documents;
mod errors;
mod policy;

pub use document::{Attribute, Document, IdentifierField, IndexEntry};
pub use documents::{DocumentStore, Eviction, WriteReceipt};
pub use errors::{ErrorKind, StoreError, StoreResult};
pub use policy::IndexPolicy;
