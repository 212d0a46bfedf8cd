//! Kill streak increment and reset logic.
//!
//! A streak only moves while the player is in the qualifying activity:
//! - killing blow by the local player on a foe increments it
//! - the local player dying, or taking a killing blow, resets it
//!
//! Downed results are never counted; the later killing blow is the kill.

use crate::combat_log::{Agent, CombatEvent, CombatResult, Iff};
use crate::state::SessionState;

use super::{GameSignal, ResetReason};

/// Check a direct-damage event for kill credit and for the local player
/// being killed. Both can apply to the same event.
pub fn check_killing_blow(
    event: &CombatEvent,
    src: Option<&Agent>,
    dst: Option<&Agent>,
    state: &mut SessionState,
    milestones: &[u32],
) -> Vec<GameSignal> {
    if event.result != CombatResult::KillingBlow || !state.in_qualifying_activity {
        return Vec::new();
    }

    let mut signals = Vec::new();

    let by_local_player = src.is_some_and(|agent| state.is_local(agent));
    if by_local_player && event.iff == Iff::Foe {
        let target_id = dst.map_or(event.dst_agent, |agent| agent.id);

        if state.dedup.is_duplicate(target_id, event.time) {
            tracing::debug!(target_id, time = event.time, "Duplicate killing blow ignored");
            signals.push(GameSignal::DuplicateKillIgnored {
                target_id,
                time: event.time,
            });
        } else {
            state.dedup.record(target_id, event.time);
            let value = state.increment_streak();
            tracing::info!(
                kill_streak = value,
                target = dst.map_or("null", Agent::display_name),
                "Kill counted"
            );
            signals.push(GameSignal::StreakIncremented {
                value,
                target_id,
                time: event.time,
            });

            if milestones.contains(&value) {
                signals.push(GameSignal::MilestoneReached { value });
            }
        }
    } else if by_local_player {
        tracing::debug!(iff = ?event.iff, "Killing blow on non-foe not counted");
    }

    if dst.is_some_and(|agent| state.is_local(agent)) {
        let previous = state.reset_streak();
        tracing::info!(previous, "Local player killed, streak reset");
        signals.push(GameSignal::StreakReset {
            previous,
            reason: ResetReason::LocalPlayerKilled,
        });
    }

    signals
}

/// A `ChangeDead` state change for the local player ends the streak.
pub fn check_local_death(src: Option<&Agent>, state: &mut SessionState) -> Vec<GameSignal> {
    let Some(agent) = src else {
        return Vec::new();
    };
    if !state.is_local(agent) || !state.in_qualifying_activity {
        return Vec::new();
    }

    let previous = state.reset_streak();
    tracing::info!(previous, "Local player died, streak reset");
    vec![GameSignal::StreakReset {
        previous,
        reason: ResetReason::LocalPlayerDied,
    }]
}
