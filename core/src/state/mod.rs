mod session;

pub use session::SessionState;
