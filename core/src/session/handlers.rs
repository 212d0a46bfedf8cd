use std::sync::Arc;

use streamlink_types::formatting::format_milestone;

use crate::signal_processor::{GameSignal, SignalHandler};
use crate::sink::{AlertSink, StateSink};

/// Persists the counter and grouped flag whenever a signal changes them.
pub struct PersistHandler {
    sink: Arc<dyn StateSink>,
}

impl PersistHandler {
    pub fn new(sink: Arc<dyn StateSink>) -> Self {
        Self { sink }
    }
}

impl SignalHandler for PersistHandler {
    fn handle_signal(&self, signal: &GameSignal) {
        match signal {
            GameSignal::StreakIncremented { value, .. } => self.sink.persist_counter(*value),
            GameSignal::StreakReset { .. } => self.sink.persist_counter(0),
            GameSignal::GroupStatusChanged { grouped, .. } => self.sink.persist_grouped(*grouped),
            _ => {}
        }
    }
}

/// Turns milestone signals into host alerts.
pub struct MilestoneHandler {
    alerts: Arc<dyn AlertSink>,
}

impl MilestoneHandler {
    pub fn new(alerts: Arc<dyn AlertSink>) -> Self {
        Self { alerts }
    }
}

impl SignalHandler for MilestoneHandler {
    fn handle_signal(&self, signal: &GameSignal) {
        if let GameSignal::MilestoneReached { value } = signal {
            self.alerts.send_alert(&format_milestone(*value));
        }
    }
}
