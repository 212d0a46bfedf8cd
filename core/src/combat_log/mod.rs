//! Normalized host payloads.
//!
//! The host hands the core a combat callback (optional event plus optional
//! source/destination agents) and, separately, roster batches. Everything the
//! classifier needs is copied into these owned types before processing so
//! nothing borrowed from the host outlives the callback.

mod agent;
mod event;

pub use agent::Agent;
pub use event::{CombatCallback, CombatEvent, CombatResult, Iff, StateChange};
