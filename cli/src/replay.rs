//! JSON-lines event replay.
//!
//! Each non-empty line is one record:
//!
//! ```text
//! {"kind":"combat","event":{"time":1000,"result":8,"iff":1},"src":{"id":7,"is_self":true,"team":2101},"dst":{"id":42}}
//! {"kind":"roster","entries":[{"account_name":"a.1234","role":2}]}
//! {"kind":"status","ui_tick":3,"map_type":9,"map_id":38}
//! {"kind":"tick"}
//! ```
//!
//! Lines starting with `#` are comments.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use streamlink_core::{CombatCallback, ExternalStatus, RosterEntry, SharedStatus, Streamlink};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid record on line {line}: {source}")]
    Json {
        line: usize,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplayRecord {
    Combat(CombatCallback),
    /// `entries` missing is delivered as a malformed roster payload.
    Roster {
        #[serde(default)]
        entries: Option<Vec<RosterEntry>>,
    },
    /// Replace the simulated external status block.
    Status(ExternalStatus),
    Tick,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub combat: usize,
    pub roster: usize,
    pub status: usize,
    pub ticks: usize,
    pub kill_streak: u32,
    pub grouped: bool,
}

impl ReplaySummary {
    pub fn records(&self) -> usize {
        self.combat + self.roster + self.status + self.ticks
    }
}

pub fn replay_file(
    path: &Path,
    tracker: &Streamlink,
    status: &SharedStatus,
) -> Result<ReplaySummary, ReplayError> {
    let file = File::open(path).map_err(|e| ReplayError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    replay_reader(BufReader::new(file), path, tracker, status)
}

/// Feed every record to the tracker in order. Stops at the first bad line.
pub fn replay_reader<R: BufRead>(
    reader: R,
    path: &Path,
    tracker: &Streamlink,
    status: &SharedStatus,
) -> Result<ReplaySummary, ReplayError> {
    let mut summary = ReplaySummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| ReplayError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let record: ReplayRecord =
            serde_json::from_str(trimmed).map_err(|e| ReplayError::Json {
                line: index + 1,
                source: e,
            })?;

        match record {
            ReplayRecord::Combat(callback) => {
                tracker.on_combat_event(&callback);
                summary.combat += 1;
            }
            ReplayRecord::Roster { entries } => {
                tracker.on_roster_update(entries.as_deref());
                summary.roster += 1;
            }
            ReplayRecord::Status(block) => {
                status.publish(block);
                summary.status += 1;
            }
            ReplayRecord::Tick => {
                tracker.tick();
                summary.ticks += 1;
            }
        }
    }

    summary.kill_streak = tracker.kill_streak();
    summary.grouped = tracker.is_grouped();
    tracing::info!(
        records = summary.records(),
        kill_streak = summary.kill_streak,
        grouped = summary.grouped,
        "Replay finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Arc;

    use streamlink_core::{HostIo, MemoryAlerts, MemorySink};
    use streamlink_types::{DetectorPolicy, StreamlinkConfig};

    use super::*;

    const SELF_TEAM: &str =
        r#"{"kind":"combat","src":{"id":7,"is_self":true,"team":2101}}"#;

    fn kill_line(target: u64, time: u64) -> String {
        format!(
            r#"{{"kind":"combat","event":{{"time":{time},"dst_agent":{target},"result":8,"iff":1}},"src":{{"id":7,"is_self":true,"team":2101}},"dst":{{"id":{target}}}}}"#
        )
    }

    fn run(config: &StreamlinkConfig, input: &str) -> (Result<ReplaySummary, ReplayError>, Arc<MemoryAlerts>) {
        let status = Arc::new(SharedStatus::new());
        let alerts = Arc::new(MemoryAlerts::new());
        let io = HostIo::new(Arc::new(MemorySink::new()), alerts.clone()).with_status(status.clone());
        let tracker = Streamlink::load(config, io);
        let result = replay_reader(Cursor::new(input), Path::new("test.jsonl"), &tracker, &status);
        (result, alerts)
    }

    #[test]
    fn test_replay_counts_kills_and_roster() {
        let mut input = String::from(SELF_TEAM);
        input.push('\n');
        for i in 1..=5 {
            input.push_str(&kill_line(100 + i, i * 2_000));
            input.push('\n');
        }
        input.push_str("\n# squad\n");
        input.push_str(r#"{"kind":"roster","entries":[{"account_name":"a.1234","role":2}]}"#);
        input.push('\n');

        let (result, alerts) = run(&StreamlinkConfig::default(), &input);
        let summary = result.expect("replay");
        assert_eq!(summary.combat, 6);
        assert_eq!(summary.roster, 1);
        assert_eq!(summary.kill_streak, 5);
        assert!(summary.grouped);
        assert_eq!(alerts.messages(), vec!["Killstreak: 5!".to_string()]);
    }

    #[test]
    fn test_replay_status_and_tick() {
        let config = StreamlinkConfig {
            detector: DetectorPolicy::ExternalStatus,
            ..Default::default()
        };
        let input = [
            r#"{"kind":"status","ui_tick":3,"map_type":9,"map_id":38}"#.to_string(),
            r#"{"kind":"tick"}"#.to_string(),
            kill_line(42, 5_000),
        ]
        .join("\n");

        let (result, _) = run(&config, &input);
        let summary = result.expect("replay");
        assert_eq!(summary.status, 1);
        assert_eq!(summary.ticks, 1);
        assert_eq!(summary.kill_streak, 1);
    }

    #[test]
    fn test_roster_without_entries_is_ignored() {
        let (result, _) = run(&StreamlinkConfig::default(), r#"{"kind":"roster"}"#);
        let summary = result.expect("replay");
        assert_eq!(summary.roster, 1);
        assert!(!summary.grouped);
    }

    #[test]
    fn test_bad_line_reports_line_number() {
        let input = format!("{SELF_TEAM}\n{{\"kind\":\"bogus\"}}\n");
        let (result, _) = run(&StreamlinkConfig::default(), &input);
        match result {
            Err(ReplayError::Json { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected json error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let status = SharedStatus::new();
        let tracker = Streamlink::load(
            &StreamlinkConfig::default(),
            HostIo::new(Arc::new(MemorySink::new()), Arc::new(MemoryAlerts::new())),
        );
        let result = replay_file(&dir.path().join("missing.jsonl"), &tracker, &status);
        assert!(matches!(result, Err(ReplayError::Io { .. })));
    }
}
