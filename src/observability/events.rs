//! Observability events for hubvault
//!
//! Events are explicit and typed; each maps to one stable log event name.

use std::fmt;

use super::logger::Severity;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Process startup begins
    BootStart,
    /// Startup complete, ready to serve
    BootComplete,
    /// Configuration loaded
    ConfigLoaded,
    /// Input exhausted, serving loop finished
    ShutdownComplete,

    // Hubs
    /// Hub registered
    HubCreated,
    /// Hub torn down
    HubRemoved,
    /// Master key stored for a hub
    MasterKeyStored,

    // Documents
    /// Document created
    DocumentCreated,
    /// Document replaced
    DocumentUpdated,
    /// Document deleted
    DocumentDeleted,
    /// Write refused by the store
    WriteRejected,
    /// A unique attribute moved to another document
    UniqueEviction,

    // Queries
    /// Query evaluated
    QueryExecuted,
    /// Query refused by the store
    QueryRejected,

    // Protocol
    /// Malformed protocol input
    RequestRejected,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "HUBVAULT_STARTUP_BEGIN",
            Event::BootComplete => "HUBVAULT_STARTUP_COMPLETE",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::HubCreated => "HUB_CREATED",
            Event::HubRemoved => "HUB_REMOVED",
            Event::MasterKeyStored => "MASTER_KEY_STORED",

            Event::DocumentCreated => "DOCUMENT_CREATED",
            Event::DocumentUpdated => "DOCUMENT_UPDATED",
            Event::DocumentDeleted => "DOCUMENT_DELETED",
            Event::WriteRejected => "WRITE_REJECTED",
            Event::UniqueEviction => "UNIQUE_EVICTION",

            Event::QueryExecuted => "QUERY_COMPLETE",
            Event::QueryRejected => "QUERY_REJECTED",

            Event::RequestRejected => "REQUEST_REJECTED",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::DocumentCreated
            | Event::DocumentUpdated
            | Event::DocumentDeleted
            | Event::QueryExecuted => Severity::Trace,
            Event::WriteRejected
            | Event::QueryRejected
            | Event::UniqueEviction
            | Event::RequestRejected => Severity::Warn,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::HubCreated.as_str(), "HUB_CREATED");
        assert_eq!(Event::QueryExecuted.to_string(), "QUERY_COMPLETE");
    }

    #[test]
    fn test_per_document_events_are_trace() {
        assert_eq!(Event::DocumentCreated.severity(), Severity::Trace);
        assert_eq!(Event::QueryExecuted.severity(), Severity::Trace);
        assert_eq!(Event::HubCreated.severity(), Severity::Info);
        assert_eq!(Event::UniqueEviction.severity(), Severity::Warn);
    }
}
