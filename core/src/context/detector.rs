//! Qualifying-activity detection.
//!
//! One `ContextDetector` is active per load. Each trigger returns
//! `Some(flag)` when the heuristic has an opinion about the current context
//! and `None` when the trigger does not concern it. Applying the answer
//! (and resetting the streak on a transition) is the processor's job.

use std::sync::Arc;

use streamlink_types::{DetectorPolicy, StreamlinkConfig};

use super::external::{ExternalStatusSource, UnavailableStatus};
use crate::combat_log::Agent;
use crate::game_data::{EXTERNAL_MAP_ID_OVERRIDE, is_wvw_map, is_wvw_map_type};

pub trait ContextDetector: Send {
    fn policy(&self) -> DetectorPolicy;

    /// Whether leaving the qualifying activity ends the streak.
    fn resets_on_exit(&self) -> bool;

    /// Agent update for the local player.
    fn on_self_identified(&mut self, _agent: &Agent) -> Option<bool> {
        None
    }

    /// The local player entered combat.
    fn on_enter_combat(&mut self, _agent: &Agent) -> Option<bool> {
        None
    }

    /// The local player's team changed to `new_team`.
    fn on_team_change(&mut self, _new_team: u16) -> Option<bool> {
        None
    }

    fn on_map_change(&mut self, _map_id: u32) -> Option<bool> {
        None
    }

    /// Periodic host heartbeat with no accompanying event.
    fn on_heartbeat(&mut self) -> Option<bool> {
        None
    }
}

/// Build the detector selected by `config.detector`.
///
/// `status` is only consulted for the external policy; without a source the
/// external detector never qualifies.
pub fn build_detector(
    config: &StreamlinkConfig,
    status: Option<Arc<dyn ExternalStatusSource>>,
) -> Box<dyn ContextDetector> {
    match config.detector {
        DetectorPolicy::TeamThreshold => Box::new(TeamThreshold::new(config.team_threshold)),
        DetectorPolicy::MapAllowList => Box::new(MapAllowList),
        DetectorPolicy::ExternalStatus => {
            let source = status.unwrap_or_else(|| Arc::new(UnavailableStatus));
            Box::new(ExternalStatusDetector::new(source))
        }
    }
}

/// Team id at or above a threshold means the player is on a WvW team.
#[derive(Debug, Clone)]
pub struct TeamThreshold {
    threshold: u16,
}

impl TeamThreshold {
    pub fn new(threshold: u16) -> Self {
        Self { threshold }
    }

    fn qualifies(&self, team: u16) -> bool {
        team >= self.threshold
    }
}

impl ContextDetector for TeamThreshold {
    fn policy(&self) -> DetectorPolicy {
        DetectorPolicy::TeamThreshold
    }

    fn resets_on_exit(&self) -> bool {
        false
    }

    /// Self updates only ever enter the activity. The host also sends one
    /// with team 0 when the local agent is removed.
    fn on_self_identified(&mut self, agent: &Agent) -> Option<bool> {
        self.qualifies(agent.team).then_some(true)
    }

    fn on_enter_combat(&mut self, agent: &Agent) -> Option<bool> {
        Some(self.qualifies(agent.team))
    }

    fn on_team_change(&mut self, new_team: u16) -> Option<bool> {
        Some(self.qualifies(new_team))
    }
}

/// Map-id state changes checked against the WvW allow-list.
#[derive(Debug, Clone, Default)]
pub struct MapAllowList;

impl ContextDetector for MapAllowList {
    fn policy(&self) -> DetectorPolicy {
        DetectorPolicy::MapAllowList
    }

    fn resets_on_exit(&self) -> bool {
        true
    }

    fn on_map_change(&mut self, map_id: u32) -> Option<bool> {
        Some(is_wvw_map(map_id))
    }
}

/// Polls an external status block whenever a zone-relevant trigger fires.
pub struct ExternalStatusDetector {
    source: Arc<dyn ExternalStatusSource>,
    warned_unavailable: bool,
}

impl ExternalStatusDetector {
    pub fn new(source: Arc<dyn ExternalStatusSource>) -> Self {
        Self {
            source,
            warned_unavailable: false,
        }
    }

    fn poll(&mut self) -> Option<bool> {
        match self.source.read() {
            Some(status) if status.is_ready() => Some(
                is_wvw_map_type(status.map_type) || status.map_id == EXTERNAL_MAP_ID_OVERRIDE,
            ),
            _ => {
                if !self.warned_unavailable {
                    tracing::warn!("External status block unavailable, treating context as not qualifying");
                    self.warned_unavailable = true;
                }
                Some(false)
            }
        }
    }
}

impl ContextDetector for ExternalStatusDetector {
    fn policy(&self) -> DetectorPolicy {
        DetectorPolicy::ExternalStatus
    }

    fn resets_on_exit(&self) -> bool {
        false
    }

    fn on_self_identified(&mut self, _agent: &Agent) -> Option<bool> {
        self.poll()
    }

    fn on_enter_combat(&mut self, _agent: &Agent) -> Option<bool> {
        self.poll()
    }

    fn on_map_change(&mut self, _map_id: u32) -> Option<bool> {
        self.poll()
    }

    fn on_heartbeat(&mut self) -> Option<bool> {
        self.poll()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::external::{ExternalStatus, SharedStatus};

    #[test]
    fn test_team_threshold() {
        let mut detector = TeamThreshold::new(9);
        assert_eq!(detector.on_self_identified(&Agent::local_player(1, 8)), None);
        assert_eq!(detector.on_self_identified(&Agent::local_player(1, 9)), Some(true));
        assert_eq!(detector.on_enter_combat(&Agent::local_player(1, 705)), Some(true));
        assert_eq!(detector.on_team_change(0), Some(false));
        assert_eq!(detector.on_map_change(38), None);
        assert!(!detector.resets_on_exit());
    }

    #[test]
    fn test_map_allow_list_ignores_agents() {
        let mut detector = MapAllowList;
        assert_eq!(detector.on_self_identified(&Agent::local_player(1, 705)), None);
        assert_eq!(detector.on_map_change(95), Some(true));
        assert_eq!(detector.on_map_change(15), Some(false));
        assert!(detector.resets_on_exit());
    }

    #[test]
    fn test_external_not_ready_is_not_qualifying() {
        let shared = Arc::new(SharedStatus::new());
        let mut detector = ExternalStatusDetector::new(shared.clone());

        // Unmapped
        assert_eq!(detector.on_heartbeat(), Some(false));

        // Mapped but zero tick
        shared.publish(ExternalStatus {
            ui_tick: 0,
            map_type: 9,
            map_id: 38,
        });
        assert_eq!(detector.on_heartbeat(), Some(false));

        shared.publish(ExternalStatus {
            ui_tick: 12,
            map_type: 9,
            map_id: 38,
        });
        assert_eq!(detector.on_heartbeat(), Some(true));
    }

    #[test]
    fn test_external_map_id_override() {
        let shared = Arc::new(SharedStatus::new());
        let mut detector = ExternalStatusDetector::new(shared.clone());
        shared.publish(ExternalStatus {
            ui_tick: 1,
            map_type: 5,
            map_id: EXTERNAL_MAP_ID_OVERRIDE,
        });
        assert_eq!(detector.on_map_change(0), Some(true));

        shared.publish(ExternalStatus {
            ui_tick: 2,
            map_type: 5,
            map_id: 15,
        });
        assert_eq!(detector.on_enter_combat(&Agent::default()), Some(false));
    }

    #[test]
    fn test_build_external_without_source() {
        let config = StreamlinkConfig {
            detector: DetectorPolicy::ExternalStatus,
            ..Default::default()
        };
        let mut detector = build_detector(&config, None);
        assert_eq!(detector.policy(), DetectorPolicy::ExternalStatus);
        assert_eq!(detector.on_heartbeat(), Some(false));
    }
}
