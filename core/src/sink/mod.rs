//! Where derived state goes.
//!
//! Sinks are best-effort: the classifier never sees a failure. A failed
//! write is logged and the next state change simply writes again.

mod file;
mod memory;

pub use file::{FileSink, SinkError};
pub use memory::{LogAlerts, MemoryAlerts, MemorySink, Persisted};

/// Durable destination for the counter and the grouped flag.
pub trait StateSink: Send + Sync {
    fn persist_counter(&self, value: u32);
    fn persist_grouped(&self, grouped: bool);
}

/// Host toast / alert surface for milestone notifications.
pub trait AlertSink: Send + Sync {
    fn send_alert(&self, message: &str);
}
