use std::sync::Mutex;

use super::{AlertSink, StateSink};

/// A single recorded sink write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persisted {
    Counter(u32),
    Grouped(bool),
}

/// Records every write in order. Used for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    writes: Mutex<Vec<Persisted>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> Vec<Persisted> {
        self.writes.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn counter_writes(&self) -> Vec<u32> {
        self.writes()
            .into_iter()
            .filter_map(|w| match w {
                Persisted::Counter(value) => Some(value),
                Persisted::Grouped(_) => None,
            })
            .collect()
    }

    pub fn grouped_writes(&self) -> Vec<bool> {
        self.writes()
            .into_iter()
            .filter_map(|w| match w {
                Persisted::Grouped(grouped) => Some(grouped),
                Persisted::Counter(_) => None,
            })
            .collect()
    }

    pub fn last_counter(&self) -> Option<u32> {
        self.counter_writes().last().copied()
    }

    pub fn last_grouped(&self) -> Option<bool> {
        self.grouped_writes().last().copied()
    }

    fn push(&self, write: Persisted) {
        self.writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(write);
    }
}

impl StateSink for MemorySink {
    fn persist_counter(&self, value: u32) {
        self.push(Persisted::Counter(value));
    }

    fn persist_grouped(&self, grouped: bool) {
        self.push(Persisted::Grouped(grouped));
    }
}

/// Alerts that only go to the log.
#[derive(Debug, Default)]
pub struct LogAlerts;

impl AlertSink for LogAlerts {
    fn send_alert(&self, message: &str) {
        tracing::info!(alert = message, "Milestone alert");
    }
}

/// Records alert messages in order.
#[derive(Debug, Default)]
pub struct MemoryAlerts {
    messages: Mutex<Vec<String>>,
}

impl MemoryAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl AlertSink for MemoryAlerts {
    fn send_alert(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());
    }
}
