use serde::{Deserialize, Serialize};

use super::Agent;

/// Friend-or-foe classification of an event's destination relative to its source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum Iff {
    Friend,
    Foe,
    #[default]
    Unknown,
}

impl From<u8> for Iff {
    fn from(raw: u8) -> Self {
        match raw {
            0 => Self::Friend,
            1 => Self::Foe,
            _ => Self::Unknown,
        }
    }
}

impl From<Iff> for u8 {
    fn from(iff: Iff) -> Self {
        match iff {
            Iff::Friend => 0,
            Iff::Foe => 1,
            Iff::Unknown => 2,
        }
    }
}

/// Outcome of a direct-damage event. Wire values match the host enum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum CombatResult {
    #[default]
    Normal,
    Crit,
    Glance,
    Block,
    Evade,
    Interrupt,
    Absorb,
    Blind,
    /// The hit killed the destination.
    KillingBlow,
    /// The hit downed the destination. Never counted as a kill.
    Downed,
    Breakbar,
    Activation,
    Unknown(u8),
}

impl From<u8> for CombatResult {
    fn from(raw: u8) -> Self {
        match raw {
            0 => Self::Normal,
            1 => Self::Crit,
            2 => Self::Glance,
            3 => Self::Block,
            4 => Self::Evade,
            5 => Self::Interrupt,
            6 => Self::Absorb,
            7 => Self::Blind,
            8 => Self::KillingBlow,
            9 => Self::Downed,
            10 => Self::Breakbar,
            11 => Self::Activation,
            other => Self::Unknown(other),
        }
    }
}

impl From<CombatResult> for u8 {
    fn from(result: CombatResult) -> Self {
        match result {
            CombatResult::Normal => 0,
            CombatResult::Crit => 1,
            CombatResult::Glance => 2,
            CombatResult::Block => 3,
            CombatResult::Evade => 4,
            CombatResult::Interrupt => 5,
            CombatResult::Absorb => 6,
            CombatResult::Blind => 7,
            CombatResult::KillingBlow => 8,
            CombatResult::Downed => 9,
            CombatResult::Breakbar => 10,
            CombatResult::Activation => 11,
            CombatResult::Unknown(raw) => raw,
        }
    }
}

/// State-change discriminator. Only the kinds the classifier reacts to get
/// their own variant; everything else is carried as `Other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum StateChange {
    #[default]
    None,
    EnterCombat,
    ExitCombat,
    ChangeUp,
    ChangeDead,
    ChangeDown,
    Spawn,
    Despawn,
    /// `dst_agent` holds the new team id, `value` the previous one.
    TeamChange,
    /// `src_agent` holds the map id.
    MapId,
    Other(u8),
}

impl From<u8> for StateChange {
    fn from(raw: u8) -> Self {
        match raw {
            0 => Self::None,
            1 => Self::EnterCombat,
            2 => Self::ExitCombat,
            3 => Self::ChangeUp,
            4 => Self::ChangeDead,
            5 => Self::ChangeDown,
            6 => Self::Spawn,
            7 => Self::Despawn,
            22 => Self::TeamChange,
            25 => Self::MapId,
            other => Self::Other(other),
        }
    }
}

impl From<StateChange> for u8 {
    fn from(kind: StateChange) -> Self {
        match kind {
            StateChange::None => 0,
            StateChange::EnterCombat => 1,
            StateChange::ExitCombat => 2,
            StateChange::ChangeUp => 3,
            StateChange::ChangeDead => 4,
            StateChange::ChangeDown => 5,
            StateChange::Spawn => 6,
            StateChange::Despawn => 7,
            StateChange::TeamChange => 22,
            StateChange::MapId => 25,
            StateChange::Other(raw) => raw,
        }
    }
}

impl StateChange {
    pub fn is_state_change(self) -> bool {
        self != Self::None
    }
}

/// A combat event record. Field meanings follow the host's layout; several
/// numeric fields are reused depending on `state_change`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatEvent {
    /// Host tick in milliseconds.
    pub time: u64,
    pub src_agent: u64,
    pub dst_agent: u64,
    pub value: i32,
    pub skill_id: u32,
    pub iff: Iff,
    pub result: CombatResult,
    pub state_change: StateChange,
}

impl CombatEvent {
    pub fn state_change(kind: StateChange, time: u64) -> Self {
        Self {
            time,
            state_change: kind,
            ..Default::default()
        }
    }

    /// Map id carried by a `MapId` state change.
    pub fn map_id(&self) -> Option<u32> {
        (self.state_change == StateChange::MapId).then(|| self.src_agent as u32)
    }

    /// New team id carried by a `TeamChange` state change.
    pub fn new_team(&self) -> Option<u16> {
        (self.state_change == StateChange::TeamChange).then(|| self.dst_agent as u16)
    }
}

/// One invocation of the host's combat callback.
///
/// `event == None` is an agent update: the host is announcing (or retiring)
/// an agent, most importantly the local player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatCallback {
    pub event: Option<CombatEvent>,
    pub src: Option<Agent>,
    pub dst: Option<Agent>,
}

impl CombatCallback {
    pub fn agent_update(src: Agent) -> Self {
        Self {
            event: None,
            src: Some(src),
            dst: None,
        }
    }

    pub fn event(event: CombatEvent, src: Option<Agent>, dst: Option<Agent>) -> Self {
        Self {
            event: Some(event),
            src,
            dst,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_values_match_host() {
        assert_eq!(CombatResult::from(8), CombatResult::KillingBlow);
        assert_eq!(CombatResult::from(9), CombatResult::Downed);
        assert_eq!(StateChange::from(4), StateChange::ChangeDead);
        assert_eq!(StateChange::from(25), StateChange::MapId);
        assert_eq!(StateChange::from(30), StateChange::Other(30));
        assert_eq!(u8::from(StateChange::Other(30)), 30);
        assert_eq!(Iff::from(1), Iff::Foe);
        assert_eq!(Iff::from(200), Iff::Unknown);
    }

    #[test]
    fn test_map_id_only_on_map_change() {
        let mut event = CombatEvent::state_change(StateChange::MapId, 10);
        event.src_agent = 1099;
        assert_eq!(event.map_id(), Some(1099));

        event.state_change = StateChange::ChangeDead;
        assert_eq!(event.map_id(), None);
    }

    #[test]
    fn test_callback_json_uses_raw_numbers() {
        let json = r#"{"event":{"time":5,"iff":1,"result":8},"src":{"id":7,"is_self":true}}"#;
        let callback: CombatCallback = serde_json::from_str(json).unwrap();
        let event = callback.event.unwrap();
        assert_eq!(event.result, CombatResult::KillingBlow);
        assert_eq!(event.iff, Iff::Foe);
        assert_eq!(event.state_change, StateChange::None);
        assert!(callback.src.unwrap().is_self);
        assert!(callback.dst.is_none());
    }
}
