//! Configuration and settings files.
//!
//! - `streamlink.toml`: full configuration (detector policy, paths, milestones)
//! - `settings.txt`: single-line override of the counter output path, kept
//!   for overlay setups that only know about that file

mod config;
mod legacy;

pub use config::{
    APP_NAME, ConfigError, default_config_path, load_config, load_default_config, save_config,
};
pub use legacy::{load_output_override, save_output_override};
