//! Combat event classification and the kill streak state machine.
//!
//! `EventProcessor` routes each callback to the context rules
//! (`context_state`) or the counter rules (`counter`) and returns
//! `GameSignal`s for handlers to persist and announce.

mod context_state;
mod counter;
mod dedup;
mod handler;
mod processor;
mod signal;


pub use dedup::KillDedup;
pub use handler::SignalHandler;
pub use processor::EventProcessor;
pub use signal::{GameSignal, ResetReason};
