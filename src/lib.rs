//! hubvault - in-memory encrypted document hubs with blinded attribute indexes
//!
//! Documents arrive already encrypted. Each carries index entries whose
//! attribute names and values are opaque blinded strings; the store answers
//! equality and presence queries over them without ever seeing plaintext.

pub mod api;
pub mod cli;
pub mod hub;
pub mod index;
pub mod observability;
pub mod query;
pub mod store;
