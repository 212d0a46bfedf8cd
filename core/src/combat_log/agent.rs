use serde::{Deserialize, Serialize};

/// An agent reference as delivered with a combat callback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Agent {
    pub id: u64,
    pub name: Option<String>,
    pub profession: u32,
    pub elite: u32,
    /// Set by the host when this agent is the local player.
    pub is_self: bool,
    pub team: u16,
}

impl Agent {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn local_player(id: u64, team: u16) -> Self {
        Self {
            id,
            is_self: true,
            team,
            ..Default::default()
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("null")
    }
}
