use std::fs;
use std::path::{Path, PathBuf};

use streamlink_types::StreamlinkConfig;
use thiserror::Error;

/// Name used for the per-user configuration directory.
pub const APP_NAME: &str = "streamlink";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Serialize error for {path:?}: {source}")]
    Serialize {
        path: PathBuf,
        source: toml::ser::Error,
    },
}

/// Load a config file. Missing keys take their defaults.
pub fn load_config(path: &Path) -> Result<StreamlinkConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Save a config to a TOML file, creating the parent directory.
pub fn save_config(path: &Path, config: &StreamlinkConfig) -> Result<(), ConfigError> {
    let contents = toml::to_string_pretty(config).map_err(|e| ConfigError::Serialize {
        path: path.to_path_buf(),
        source: e,
    })?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(path, contents).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load the per-user config, falling back to defaults on any error.
pub fn load_default_config() -> StreamlinkConfig {
    match confy::load::<StreamlinkConfig>(APP_NAME, None) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load user config, using defaults");
            StreamlinkConfig::default()
        }
    }
}

/// Location of the per-user config file, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    confy::get_configuration_file_path(APP_NAME, None).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamlink_types::DetectorPolicy;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("streamlink.toml");

        let config = StreamlinkConfig {
            detector: DetectorPolicy::ExternalStatus,
            milestones: vec![3, 7],
            ..Default::default()
        };
        save_config(&path, &config).unwrap();

        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("streamlink.toml");
        fs::write(&path, "team_threshold = \"nine\"").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("streamlink.toml"));
    }
}
