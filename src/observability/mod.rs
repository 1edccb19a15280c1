//! Observability subsystem for hubvault
//!
//! - Structured logging (JSON lines on stderr)
//! - Lock-free counters
//! - Typed lifecycle and engine events
//!
//! Observability is read-only: it never influences engine results.
//!
//! # Usage
//!
//! ```ignore
//! use hubvault::observability::{log_event_with_fields, Event, MetricsRegistry};
//!
//! log_event_with_fields(Event::HubCreated, &[("hub", "z1...")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_queries_executed();
//! ```

mod events;
mod logger;
mod metrics;

use std::io::{self, Write};

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

/// Log a lifecycle event at its own severity
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log an event with fields at its own severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    write_event(event, fields, &mut io::stderr());
}

fn write_event<W: Write>(event: Event, fields: &[(&str, &str)], writer: &mut W) {
    let severity = event.severity();
    if Logger::enabled(severity) {
        Logger::log_to_writer(severity, event.as_str(), fields, writer);
    }
}
