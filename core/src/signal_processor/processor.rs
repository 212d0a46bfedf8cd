use std::sync::Arc;

use streamlink_types::{DetectorPolicy, StreamlinkConfig};

use crate::combat_log::{CombatCallback, StateChange};
use crate::context::{ContextDetector, ExternalStatusSource, build_detector};
use crate::state::SessionState;

use super::GameSignal;
use super::context_state::{advance_context_state, apply_context_answer, identify_self};
use super::counter::{check_killing_blow, check_local_death};

/// Classifies combat callbacks, updates the session and returns signals.
/// This is the state machine behind the kill streak.
pub struct EventProcessor {
    detector: Box<dyn ContextDetector>,
    milestones: Vec<u32>,
}

impl EventProcessor {
    pub fn new(detector: Box<dyn ContextDetector>, milestones: Vec<u32>) -> Self {
        Self {
            detector,
            milestones,
        }
    }

    pub fn from_config(
        config: &StreamlinkConfig,
        status: Option<Arc<dyn ExternalStatusSource>>,
    ) -> Self {
        Self::new(build_detector(config, status), config.milestones.clone())
    }

    pub fn policy(&self) -> DetectorPolicy {
        self.detector.policy()
    }

    /// Process one combat callback in delivery order.
    pub fn process_callback(
        &mut self,
        callback: &CombatCallback,
        state: &mut SessionState,
    ) -> Vec<GameSignal> {
        let src = callback.src.as_ref();
        let dst = callback.dst.as_ref();

        // 1. Agent update: only the local player matters
        let Some(event) = &callback.event else {
            return match src {
                Some(agent) if agent.is_self => identify_self(agent, self.detector.as_mut(), state),
                _ => Vec::new(),
            };
        };

        // 2. State changes never carry kill credit
        if event.state_change.is_state_change() {
            return match event.state_change {
                StateChange::ChangeDead => check_local_death(src, state),
                _ => advance_context_state(event, src, self.detector.as_mut(), state),
            };
        }

        // 3. Direct damage results
        check_killing_blow(event, src, dst, state, &self.milestones)
    }

    /// Host heartbeat with no event. Lets polling detectors notice a zone
    /// change that arrived without a state-change event.
    pub fn heartbeat(&mut self, state: &mut SessionState) -> Vec<GameSignal> {
        let answer = self.detector.on_heartbeat();
        apply_context_answer(answer, self.detector.as_ref(), state)
    }
}
