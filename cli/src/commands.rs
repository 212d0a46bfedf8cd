use std::path::Path;
use std::sync::Arc;

use streamlink_core::settings::{load_config, load_default_config};
use streamlink_core::{
    Agent, CombatCallback, CombatEvent, CombatResult, HostIo, Iff, MemoryAlerts, MemorySink,
    RosterEntry, SharedStatus, StateChange, Streamlink, UserRole,
};
use streamlink_types::StreamlinkConfig;

use crate::replay::{ReplaySummary, replay_file};

/// Agent id the REPL uses for the local player.
const SELF_ID: u64 = 1;
/// Simulated host time advanced per REPL command.
const TICK_STEP_MS: u64 = 1_000;

/// Explicit `--config` must load; otherwise the per-user config or defaults.
pub fn resolve_config(path: Option<&Path>) -> Result<StreamlinkConfig, String> {
    match path {
        Some(path) => load_config(path).map_err(|e| e.to_string()),
        None => Ok(load_default_config()),
    }
}

/// Tracker plus the collaborators the CLI keeps a handle on.
pub struct HostSession {
    pub tracker: Streamlink,
    pub status: Arc<SharedStatus>,
    /// Present for dry runs, where nothing touches the disk.
    pub memory: Option<Arc<MemorySink>>,
}

impl HostSession {
    pub fn load(config: &StreamlinkConfig, dry_run: bool) -> Self {
        let status = Arc::new(SharedStatus::new());
        let (io, memory) = if dry_run {
            let memory = Arc::new(MemorySink::new());
            let io = HostIo::new(memory.clone(), Arc::new(MemoryAlerts::new()));
            (io, Some(memory))
        } else {
            (HostIo::files(config), None)
        };
        let tracker = Streamlink::load(config, io.with_status(status.clone()));
        Self {
            tracker,
            status,
            memory,
        }
    }
}

pub fn replay(path: &Path, config: &StreamlinkConfig, dry_run: bool) -> Result<(), String> {
    let host = HostSession::load(config, dry_run);
    let result = replay_file(path, &host.tracker, &host.status);
    host.tracker.unload();
    let summary = result.map_err(|e| e.to_string())?;

    print_summary(&summary);
    if let Some(memory) = &host.memory {
        println!("Counter writes: {:?}", memory.counter_writes());
        println!("Grouped writes: {:?}", memory.grouped_writes());
    }
    Ok(())
}

fn print_summary(summary: &ReplaySummary) {
    println!("Records:     {}", summary.records());
    println!("  combat:    {}", summary.combat);
    println!("  roster:    {}", summary.roster);
    println!("  status:    {}", summary.status);
    println!("  ticks:     {}", summary.ticks);
    println!("Kill streak: {}", summary.kill_streak);
    println!("Grouped:     {}", summary.grouped);
}

/// Hand-typed events for the interactive prompt.
pub struct Repl {
    host: HostSession,
    clock: u64,
    team: u16,
    next_target: u64,
}

impl Repl {
    pub fn new(host: HostSession) -> Self {
        Self {
            host,
            clock: 0,
            team: 0,
            next_target: 1_000,
        }
    }

    fn advance(&mut self) -> u64 {
        self.clock += TICK_STEP_MS;
        self.clock
    }

    fn local_player(&self) -> Agent {
        Agent::local_player(SELF_ID, self.team)
    }

    pub fn identify(&mut self, team: u16) {
        self.team = team;
        self.host
            .tracker
            .on_combat_event(&CombatCallback::agent_update(self.local_player()));
        println!(
            "Self agent {SELF_ID} on team {team}, qualifying: {}",
            self.host.tracker.in_qualifying_activity()
        );
    }

    pub fn kill(&mut self, target: Option<u64>) {
        let target = target.unwrap_or_else(|| {
            self.next_target += 1;
            self.next_target
        });
        let event = CombatEvent {
            time: self.advance(),
            src_agent: SELF_ID,
            dst_agent: target,
            iff: Iff::Foe,
            result: CombatResult::KillingBlow,
            ..Default::default()
        };
        let callback =
            CombatCallback::event(event, Some(self.local_player()), Some(Agent::new(target)));
        self.host.tracker.on_combat_event(&callback);
        println!("Kill streak: {}", self.host.tracker.kill_streak());
    }

    pub fn death(&mut self) {
        let event = CombatEvent::state_change(StateChange::ChangeDead, self.advance());
        let callback = CombatCallback::event(event, Some(self.local_player()), None);
        self.host.tracker.on_combat_event(&callback);
        println!("Kill streak: {}", self.host.tracker.kill_streak());
    }

    pub fn map(&mut self, map_id: u32) {
        let mut event = CombatEvent::state_change(StateChange::MapId, self.advance());
        event.src_agent = u64::from(map_id);
        self.host
            .tracker
            .on_combat_event(&CombatCallback::event(event, None, None));
        println!(
            "Map {map_id}, qualifying: {}",
            self.host.tracker.in_qualifying_activity()
        );
    }

    pub fn roster(&mut self, account: &str, role: UserRole) {
        self.host
            .tracker
            .on_roster_update(Some(&[RosterEntry::new(account, role)]));
        println!(
            "Group members: {}, grouped: {}",
            self.host.tracker.group_size(),
            self.host.tracker.is_grouped()
        );
    }

    pub fn tick(&mut self) {
        self.host.tracker.tick();
        println!(
            "Qualifying: {}",
            self.host.tracker.in_qualifying_activity()
        );
    }

    pub fn status(&self) {
        let tracker = &self.host.tracker;
        let policy = tracker.policy().map_or("unloaded", |p| p.label());
        println!("Policy:      {policy}");
        println!("Qualifying:  {}", tracker.in_qualifying_activity());
        println!("Kill streak: {}", tracker.kill_streak());
        println!(
            "Self id:     {}",
            tracker
                .self_id()
                .map_or_else(|| "unknown".to_string(), |id| id.to_string())
        );
        println!(
            "Grouped:     {} ({} members)",
            tracker.is_grouped(),
            tracker.group_size()
        );
    }

    pub fn save(&self) -> Result<(), String> {
        self.host
            .tracker
            .save_settings()
            .map_err(|e| e.to_string())?;
        println!("Settings saved");
        Ok(())
    }

    pub fn exit(&self) {
        self.host.tracker.unload();
        if let Some(memory) = &self.host.memory {
            println!("Counter writes: {:?}", memory.counter_writes());
            println!("Grouped writes: {:?}", memory.grouped_writes());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repl() -> Repl {
        Repl::new(HostSession::load(&StreamlinkConfig::default(), true))
    }

    #[test]
    fn test_repl_streak_round() {
        let mut repl = repl();
        repl.identify(2101);
        repl.kill(None);
        repl.kill(None);
        assert_eq!(repl.host.tracker.kill_streak(), 2);

        repl.death();
        assert_eq!(repl.host.tracker.kill_streak(), 0);

        repl.exit();
        let memory = repl.host.memory.as_ref().expect("dry run sink");
        assert_eq!(memory.counter_writes(), vec![0, 0, 1, 2, 0, 0]);
    }

    #[test]
    fn test_repl_same_target_is_not_deduplicated_across_steps() {
        let mut repl = repl();
        repl.identify(2101);
        repl.kill(Some(5));
        repl.kill(Some(5));
        assert_eq!(repl.host.tracker.kill_streak(), 2);
    }

    #[test]
    fn test_repl_roster() {
        let mut repl = repl();
        repl.roster("a.1234", UserRole::Member);
        assert!(repl.host.tracker.is_grouped());
        repl.roster("a.1234", UserRole::None);
        assert!(!repl.host.tracker.is_grouped());
    }

    #[test]
    fn test_resolve_config_missing_file_errors() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        assert!(resolve_config(Some(&dir.path().join("nope.toml"))).is_err());
    }
}
