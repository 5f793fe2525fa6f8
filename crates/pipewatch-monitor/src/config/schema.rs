use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use pipewatch_core::error::{PipewatchError, Result};
use pipewatch_core::{MalformedDuration, Thresholds};

/// Unknown keys are ignored at every level.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    pub prometheus: PrometheusSection,
    pub monitor: MonitorSection,
    pub thresholds: Thresholds,
}

impl MonitorConfig {
    pub fn validate(&self) -> Result<()> {
        // Thresholds are taken as written.
        self.monitor.validate()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrometheusSection {
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitorSection {
    /// Seconds between cycles.
    pub interval: u64,

    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,

    #[serde(default)]
    pub malformed_duration: MalformedDuration,
}

impl MonitorSection {
    pub fn validate(&self) -> Result<()> {
        if self.interval == 0 {
            return Err(PipewatchError::Config(
                "monitor.interval must be at least 1 second".into(),
            ));
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }
}

fn default_log_path() -> PathBuf {
    PathBuf::from("sample_jenkins.log")
}
