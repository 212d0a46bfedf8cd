//! Qualifying-activity transitions.
//!
//! Detectors only answer "qualifying or not"; this module owns the rule that
//! turns a changed answer into a streak reset:
//! - false -> true always resets
//! - true -> false resets only when the active policy says leaving ends the streak

use crate::combat_log::{Agent, CombatEvent, StateChange};
use crate::context::ContextDetector;
use crate::state::SessionState;

use super::{GameSignal, ResetReason};

/// Apply a detector answer to the session and emit the resulting signals.
pub fn apply_context_answer(
    answer: Option<bool>,
    detector: &dyn ContextDetector,
    state: &mut SessionState,
) -> Vec<GameSignal> {
    let Some(qualifying) = answer else {
        return Vec::new();
    };
    if qualifying == state.in_qualifying_activity {
        return Vec::new();
    }

    state.in_qualifying_activity = qualifying;
    let policy = detector.policy();
    tracing::info!(qualifying, policy = policy.label(), "Qualifying activity changed");

    let mut signals = vec![GameSignal::ContextChanged { qualifying, policy }];

    let reason = if qualifying {
        Some(ResetReason::EnteredActivity)
    } else if detector.resets_on_exit() {
        Some(ResetReason::LeftActivity)
    } else {
        None
    };

    if let Some(reason) = reason {
        let previous = state.reset_streak();
        signals.push(GameSignal::StreakReset { previous, reason });
    }

    signals
}

/// Handle an agent update for the local player: remember who we are and
/// re-run the detector.
pub fn identify_self(
    src: &Agent,
    detector: &mut dyn ContextDetector,
    state: &mut SessionState,
) -> Vec<GameSignal> {
    state.record_self(src);
    tracing::debug!(
        agent_id = src.id,
        name = src.display_name(),
        team = src.team,
        "Self agent detected"
    );

    let mut signals = vec![GameSignal::SelfIdentified {
        agent_id: src.id,
        team: src.team,
    }];
    let answer = detector.on_self_identified(src);
    signals.extend(apply_context_answer(answer, detector, state));
    signals
}

/// Route the zone-relevant state changes (entered combat, team change,
/// map id) to the detector.
pub fn advance_context_state(
    event: &CombatEvent,
    src: Option<&Agent>,
    detector: &mut dyn ContextDetector,
    state: &mut SessionState,
) -> Vec<GameSignal> {
    let local_src = src.filter(|agent| state.is_local(agent));

    let answer = match event.state_change {
        StateChange::EnterCombat => {
            let Some(agent) = local_src else {
                return Vec::new();
            };
            tracing::debug!(
                team = agent.team,
                qualifying = state.in_qualifying_activity,
                "Entered combat"
            );
            detector.on_enter_combat(agent)
        }
        StateChange::TeamChange => {
            if local_src.is_none() {
                return Vec::new();
            }
            let Some(new_team) = event.new_team() else {
                return Vec::new();
            };
            detector.on_team_change(new_team)
        }
        StateChange::MapId => {
            let Some(map_id) = event.map_id() else {
                return Vec::new();
            };
            tracing::debug!(
                map_id,
                qualifying = state.in_qualifying_activity,
                "Map changed"
            );
            detector.on_map_change(map_id)
        }
        _ => return Vec::new(),
    };

    apply_context_answer(answer, detector, state)
}
