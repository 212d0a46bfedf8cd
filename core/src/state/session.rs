use crate::combat_log::Agent;
use crate::signal_processor::KillDedup;

/// Pure storage for the per-load streak state.
/// Transition logic lives in EventProcessor.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub kill_streak: u32,
    pub in_qualifying_activity: bool,
    /// Local player's agent id, once an agent update has announced it.
    pub self_id: Option<u64>,
    pub dedup: KillDedup,
}

impl SessionState {
    pub fn new(kill_dedup_window_ms: u64) -> Self {
        Self {
            dedup: KillDedup::new(kill_dedup_window_ms),
            ..Default::default()
        }
    }

    /// The local player, by host flag or by the recorded self id.
    pub fn is_local(&self, agent: &Agent) -> bool {
        agent.is_self || (agent.id != 0 && self.self_id == Some(agent.id))
    }

    pub fn record_self(&mut self, agent: &Agent) {
        if agent.id != 0 {
            self.self_id = Some(agent.id);
        }
    }

    /// Returns the new streak value.
    pub fn increment_streak(&mut self) -> u32 {
        self.kill_streak = self.kill_streak.saturating_add(1);
        self.kill_streak
    }

    /// Returns the streak value before the reset.
    pub fn reset_streak(&mut self) -> u32 {
        self.dedup.clear();
        std::mem::take(&mut self.kill_streak)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_by_flag_or_id() {
        let mut state = SessionState::new(0);
        assert!(state.is_local(&Agent::local_player(5, 0)));
        assert!(!state.is_local(&Agent::new(5)));

        state.record_self(&Agent::local_player(5, 0));
        assert!(state.is_local(&Agent::new(5)));
        assert!(!state.is_local(&Agent::new(6)));
    }

    #[test]
    fn test_zero_id_never_recorded() {
        let mut state = SessionState::new(0);
        state.record_self(&Agent::local_player(0, 0));
        assert_eq!(state.self_id, None);
        assert!(!state.is_local(&Agent::new(0)));
    }

    #[test]
    fn test_reset_returns_previous() {
        let mut state = SessionState::new(0);
        state.increment_streak();
        state.increment_streak();
        assert_eq!(state.reset_streak(), 2);
        assert_eq!(state.kill_streak, 0);
    }
}
