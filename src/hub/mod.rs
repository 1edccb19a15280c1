//! Hubs for hubvault
//!
//! A hub is one document store plus its master key, guarded by its own
//! lock. The registry is an explicit value: construct one, hand it to the
//! request handler, drop it to tear every hub down.

mod config;
mod instance;
mod registry;

pub use config::{HubConfig, HubId};
pub use instance::{Hub, HubInfo, MasterKeyOutcome};
pub use registry::HubRegistry;
