//! Host boundary: load/unload lifecycle and the callback entry points.

mod handlers;
mod io;
mod tracker;


pub use handlers::{MilestoneHandler, PersistHandler};
pub use io::{HostIo, SettingsFile};
pub use tracker::Streamlink;
