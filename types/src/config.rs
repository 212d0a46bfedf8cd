use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default streak values that raise a host alert.
pub const DEFAULT_MILESTONES: [u32; 5] = [5, 10, 25, 50, 100];

/// Team ids at or above this value belong to World-vs-World teams.
pub const DEFAULT_TEAM_THRESHOLD: u16 = 9;

/// Duplicate killing-blow suppression is opt-in; `0` counts every killing blow.
pub const DEFAULT_KILL_DEDUP_WINDOW_MS: u64 = 0;

/// Which heuristic decides that the player is in the qualifying activity.
///
/// Exactly one is active per load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectorPolicy {
    /// Local player's team id compared against `team_threshold`.
    #[default]
    #[serde(rename = "team")]
    TeamThreshold,
    /// Map-id state changes checked against a fixed allow-list.
    #[serde(rename = "map")]
    MapAllowList,
    /// Polled external status block (map type / map id).
    #[serde(rename = "external")]
    ExternalStatus,
}

impl DetectorPolicy {
    pub fn label(self) -> &'static str {
        match self {
            Self::TeamThreshold => "team",
            Self::MapAllowList => "map",
            Self::ExternalStatus => "external",
        }
    }
}

/// Output and settings file locations.
///
/// Relative paths are resolved against `game_dir` when it is set,
/// otherwise against the process working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputPaths {
    pub game_dir: Option<PathBuf>,
    pub killstreak: PathBuf,
    pub squad: PathBuf,
    /// Single-line file holding a relative override for `killstreak`.
    pub settings: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            game_dir: None,
            killstreak: PathBuf::from("addons/streamlink/killstreak.txt"),
            squad: PathBuf::from("addons/streamlink/squad.txt"),
            settings: PathBuf::from("addons/streamlink/settings.txt"),
        }
    }
}

impl OutputPaths {
    /// Join a relative path onto `game_dir`; absolute paths pass through.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.game_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }

    pub fn killstreak_path(&self) -> PathBuf {
        self.resolve(&self.killstreak)
    }

    pub fn squad_path(&self) -> PathBuf {
        self.resolve(&self.squad)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.resolve(&self.settings)
    }
}

/// Top-level `streamlink.toml` contents. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamlinkConfig {
    pub detector: DetectorPolicy,
    pub team_threshold: u16,
    /// Second killing blow on the same target inside this window is not
    /// counted. `0` disables suppression.
    pub kill_dedup_window_ms: u64,
    pub milestones: Vec<u32>,
    pub paths: OutputPaths,
}

impl Default for StreamlinkConfig {
    fn default() -> Self {
        Self {
            detector: DetectorPolicy::default(),
            team_threshold: DEFAULT_TEAM_THRESHOLD,
            kill_dedup_window_ms: DEFAULT_KILL_DEDUP_WINDOW_MS,
            milestones: DEFAULT_MILESTONES.to_vec(),
            paths: OutputPaths::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: StreamlinkConfig = toml::from_str("").unwrap();
        assert_eq!(config, StreamlinkConfig::default());
        assert_eq!(config.detector, DetectorPolicy::TeamThreshold);
        assert_eq!(config.milestones, vec![5, 10, 25, 50, 100]);
        assert_eq!(config.kill_dedup_window_ms, 0);
    }

    #[test]
    fn test_partial_toml() {
        let toml = r#"
detector = "map"
kill_dedup_window_ms = 1500

[paths]
game_dir = "C:/Games/Guild Wars 2"
"#;
        let config: StreamlinkConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.detector, DetectorPolicy::MapAllowList);
        assert_eq!(config.kill_dedup_window_ms, 1500);
        assert_eq!(config.team_threshold, DEFAULT_TEAM_THRESHOLD);
        assert_eq!(
            config.paths.killstreak_path(),
            PathBuf::from("C:/Games/Guild Wars 2").join("addons/streamlink/killstreak.txt")
        );
    }

    #[test]
    fn test_absolute_path_not_rebased() {
        let paths = OutputPaths {
            game_dir: Some(PathBuf::from("game")),
            ..Default::default()
        };
        let absolute = std::env::temp_dir().join("killstreak.txt");
        assert_eq!(paths.resolve(&absolute), absolute);
    }

    #[test]
    fn test_unknown_detector_rejected() {
        assert!(toml::from_str::<StreamlinkConfig>("detector = \"guess\"").is_err());
    }
}
