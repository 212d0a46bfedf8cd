pub mod combat_log;
pub mod context;
pub mod game_data;
pub mod roster;
pub mod session;
pub mod settings;
pub mod signal_processor;
pub mod sink;
pub mod state;

// Re-exports for convenience
pub use combat_log::{Agent, CombatCallback, CombatEvent, CombatResult, Iff, StateChange};
pub use context::{ExternalStatus, ExternalStatusSource, SharedStatus};
pub use roster::{GroupRoster, RosterEntry, UserRole};
pub use session::{HostIo, Streamlink};
pub use signal_processor::{EventProcessor, GameSignal, SignalHandler};
pub use sink::{AlertSink, FileSink, MemoryAlerts, MemorySink, StateSink};
pub use state::SessionState;
