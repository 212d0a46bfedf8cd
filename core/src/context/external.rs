use std::sync::RwLock;

use serde::{Deserialize, Serialize};

/// Snapshot of the host's continuously refreshed status block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalStatus {
    /// Heartbeat counter; zero until the game has written the block.
    pub ui_tick: u32,
    /// Small-integer area kind.
    pub map_type: u32,
    pub map_id: u32,
}

impl ExternalStatus {
    pub fn is_ready(&self) -> bool {
        self.ui_tick != 0
    }
}

/// Read access to the status block. `None` means the block is not mapped.
pub trait ExternalStatusSource: Send + Sync {
    fn read(&self) -> Option<ExternalStatus>;
}

/// Source used when no status block was handed to the core.
#[derive(Debug, Default)]
pub struct UnavailableStatus;

impl ExternalStatusSource for UnavailableStatus {
    fn read(&self) -> Option<ExternalStatus> {
        None
    }
}

/// In-process status block, written by whatever maps the real one
/// (or by a replay driver) and read by the detector.
#[derive(Debug, Default)]
pub struct SharedStatus {
    current: RwLock<Option<ExternalStatus>>,
}

impl SharedStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, status: ExternalStatus) {
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current = Some(status);
    }

    /// Mark the block as unmapped again.
    pub fn clear(&self) {
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current = None;
    }
}

impl ExternalStatusSource for SharedStatus {
    fn read(&self) -> Option<ExternalStatus> {
        *self.current.read().unwrap_or_else(|e| e.into_inner())
    }
}
