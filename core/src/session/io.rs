use std::path::PathBuf;
use std::sync::Arc;

use streamlink_types::StreamlinkConfig;

use crate::context::ExternalStatusSource;
use crate::settings::load_output_override;
use crate::sink::{AlertSink, FileSink, LogAlerts, StateSink};

/// Settings file location plus the counter output path it stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsFile {
    pub path: PathBuf,
    /// Relative (or absolute) counter output path as written to the file.
    pub output_path: PathBuf,
}

/// Collaborators handed to the tracker at load.
pub struct HostIo {
    pub sink: Arc<dyn StateSink>,
    pub alerts: Arc<dyn AlertSink>,
    pub status: Option<Arc<dyn ExternalStatusSource>>,
    pub settings: Option<SettingsFile>,
}

impl HostIo {
    /// File outputs resolved from `config.paths`, honoring the single-line
    /// settings override for the counter file.
    pub fn files(config: &StreamlinkConfig) -> Self {
        let paths = &config.paths;
        let settings_path = paths.settings_path();
        let output_path =
            load_output_override(&settings_path).unwrap_or_else(|| paths.killstreak.clone());

        let sink = FileSink::new(paths.resolve(&output_path), paths.squad_path());
        tracing::debug!(
            killstreak = %sink.counter_path().display(),
            squad = %sink.grouped_path().display(),
            "Output files resolved"
        );

        Self {
            sink: Arc::new(sink),
            alerts: Arc::new(LogAlerts),
            status: None,
            settings: Some(SettingsFile {
                path: settings_path,
                output_path,
            }),
        }
    }

    /// Arbitrary sinks, no settings file.
    pub fn new(sink: Arc<dyn StateSink>, alerts: Arc<dyn AlertSink>) -> Self {
        Self {
            sink,
            alerts,
            status: None,
            settings: None,
        }
    }

    pub fn with_status(mut self, status: Arc<dyn ExternalStatusSource>) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_alerts(mut self, alerts: Arc<dyn AlertSink>) -> Self {
        self.alerts = alerts;
        self
    }
}
