use std::io;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex, MutexGuard};

use streamlink_types::{DetectorPolicy, StreamlinkConfig};

use super::handlers::{MilestoneHandler, PersistHandler};
use super::io::{HostIo, SettingsFile};
use crate::combat_log::CombatCallback;
use crate::roster::{GroupRoster, RosterEntry};
use crate::settings::save_output_override;
use crate::signal_processor::{EventProcessor, GameSignal, SignalHandler};
use crate::sink::StateSink;
use crate::state::SessionState;

/// Everything the kill streak needs, guarded together.
struct StreakSession {
    processor: EventProcessor,
    state: SessionState,
}

/// The add-on as the host sees it.
///
/// Created by `load`, fed by the combat and roster callbacks from any
/// thread, flushed by `unload`. Callbacks after `unload` are ignored.
pub struct Streamlink {
    session: Mutex<Option<StreakSession>>,
    roster: Mutex<Option<GroupRoster>>,
    sink: Arc<dyn StateSink>,
    signal_handlers: Vec<Box<dyn SignalHandler + Send + Sync>>,
    settings: Option<SettingsFile>,
}

impl Streamlink {
    /// Build the session and write the initial `0` / `0` outputs.
    pub fn load(config: &StreamlinkConfig, io: HostIo) -> Self {
        let HostIo {
            sink,
            alerts,
            status,
            settings,
        } = io;

        let session = StreakSession {
            processor: EventProcessor::from_config(config, status),
            state: SessionState::new(config.kill_dedup_window_ms),
        };

        let signal_handlers: Vec<Box<dyn SignalHandler + Send + Sync>> = vec![
            Box::new(PersistHandler::new(sink.clone())),
            Box::new(MilestoneHandler::new(alerts)),
        ];

        sink.persist_counter(0);
        sink.persist_grouped(false);

        tracing::info!(
            policy = config.detector.label(),
            team_threshold = config.team_threshold,
            kill_dedup_window_ms = config.kill_dedup_window_ms,
            "Streamlink loaded"
        );

        Self {
            session: Mutex::new(Some(session)),
            roster: Mutex::new(Some(GroupRoster::new())),
            sink,
            signal_handlers,
            settings,
        }
    }

    /// Register an extra signal handler. Handlers run under the session or
    /// roster lock and must not call back into the tracker.
    pub fn add_signal_handler(&mut self, handler: Box<dyn SignalHandler + Send + Sync>) {
        self.signal_handlers.push(handler);
    }

    /// Combat callback entry point.
    pub fn on_combat_event(&self, callback: &CombatCallback) {
        contain_panic("combat", || {
            let mut guard = lock(&self.session);
            let Some(session) = guard.as_mut() else {
                tracing::trace!("Combat event after unload ignored");
                return;
            };
            let signals = session
                .processor
                .process_callback(callback, &mut session.state);
            self.dispatch_signals(&signals);
        });
    }

    /// Roster callback entry point. `None` is a malformed payload.
    pub fn on_roster_update(&self, entries: Option<&[RosterEntry]>) {
        contain_panic("roster", || {
            let Some(entries) = entries else {
                tracing::debug!("Roster update without entries ignored");
                return;
            };

            let mut guard = lock(&self.roster);
            let Some(roster) = guard.as_mut() else {
                tracing::trace!("Roster update after unload ignored");
                return;
            };
            if let Some(grouped) = roster.apply_update(entries) {
                self.dispatch_signals(&[GameSignal::GroupStatusChanged {
                    grouped,
                    members: roster.len(),
                }]);
            }
        });
    }

    /// Heartbeat with no event, used by polling detectors.
    pub fn tick(&self) {
        contain_panic("tick", || {
            let mut guard = lock(&self.session);
            let Some(session) = guard.as_mut() else {
                return;
            };
            let signals = session.processor.heartbeat(&mut session.state);
            self.dispatch_signals(&signals);
        });
    }

    /// Final flush of both outputs, then drop the session. Idempotent.
    pub fn unload(&self) {
        contain_panic("unload", || {
            let mut session = lock(&self.session);
            let Some(finished) = session.take() else {
                return;
            };
            self.sink.persist_counter(finished.state.kill_streak);

            let grouped = lock(&self.roster)
                .take()
                .is_some_and(|roster| roster.is_grouped());
            self.sink.persist_grouped(grouped);

            tracing::info!(
                final_kill_streak = finished.state.kill_streak,
                "Streamlink unloaded"
            );
        });
    }

    /// Write the legacy settings file back, if this load has one.
    pub fn save_settings(&self) -> io::Result<()> {
        let Some(settings) = &self.settings else {
            return Ok(());
        };
        save_output_override(&settings.path, &settings.output_path)
    }

    pub fn is_loaded(&self) -> bool {
        lock(&self.session).is_some()
    }

    pub fn kill_streak(&self) -> u32 {
        lock(&self.session)
            .as_ref()
            .map_or(0, |session| session.state.kill_streak)
    }

    pub fn in_qualifying_activity(&self) -> bool {
        lock(&self.session)
            .as_ref()
            .is_some_and(|session| session.state.in_qualifying_activity)
    }

    pub fn self_id(&self) -> Option<u64> {
        lock(&self.session)
            .as_ref()
            .and_then(|session| session.state.self_id)
    }

    pub fn policy(&self) -> Option<DetectorPolicy> {
        lock(&self.session)
            .as_ref()
            .map(|session| session.processor.policy())
    }

    pub fn is_grouped(&self) -> bool {
        lock(&self.roster)
            .as_ref()
            .is_some_and(GroupRoster::is_grouped)
    }

    pub fn group_size(&self) -> usize {
        lock(&self.roster).as_ref().map_or(0, GroupRoster::len)
    }

    fn dispatch_signals(&self, signals: &[GameSignal]) {
        if signals.is_empty() {
            return;
        }
        for handler in &self.signal_handlers {
            handler.handle_signals(signals);
        }
    }
}

/// A panicking holder leaves the data consistent enough to keep counting.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("Recovered poisoned lock");
        let guard = poisoned.into_inner();
        mutex.clear_poison();
        guard
    })
}

fn contain_panic(entry: &'static str, f: impl FnOnce()) {
    if let Err(payload) = catch_unwind(AssertUnwindSafe(f)) {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        tracing::error!(entry, panic = %message, "Callback panicked, event dropped");
    }
}
