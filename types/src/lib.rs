//! Shared configuration types for Streamlink.
//!
//! Kept free of runtime logic so the core and the CLI agree on one
//! serialized shape for `streamlink.toml`.

pub mod config;
pub mod formatting;

pub use config::{DetectorPolicy, OutputPaths, StreamlinkConfig};
