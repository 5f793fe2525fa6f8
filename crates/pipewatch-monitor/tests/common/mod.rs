//! Shared helpers for monitor integration tests.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use pipewatch_core::error::{PipewatchError, Result};
use pipewatch_core::Alert;
use pipewatch_monitor::alert::AlertSink;
use pipewatch_monitor::config::{self, MonitorConfig};
use pipewatch_monitor::scheduler::Ticker;

pub fn config_for(
    log: &Path,
    port: u16,
    max_failures: i64,
    max_secs: f64,
    mode: &str,
) -> MonitorConfig {
    let yaml = format!(
        r#"
prometheus:
  port: {port}
monitor:
  interval: 1
  log_path: "{}"
  malformed_duration: {mode}
thresholds:
  max_failure_count: {max_failures}
  max_test_execution_time: {max_secs:?}
"#,
        log.display()
    );
    config::load_from_str(&yaml).unwrap()
}

pub fn write_log(f: &mut tempfile::NamedTempFile, text: &str) {
    let file = f.as_file_mut();
    file.set_len(0).unwrap();
    std::io::Seek::rewind(file).unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
}

/// Keeps every message it is sent.
#[derive(Default)]
pub struct RecordingSink {
    pub messages: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn taken(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.lock().unwrap())
    }
}

#[async_trait]
impl AlertSink for RecordingSink {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, alert: &Alert) -> Result<()> {
        self.messages.lock().unwrap().push(alert.message());
        Ok(())
    }
}

/// Always fails.
pub struct BrokenSink;

#[async_trait]
impl AlertSink for BrokenSink {
    fn name(&self) -> &'static str {
        "broken"
    }

    async fn send(&self, _alert: &Alert) -> Result<()> {
        Err(PipewatchError::Alert("webhook unreachable".into()))
    }
}

/// Ticks a fixed number of times without sleeping.
pub struct CountdownTicker {
    pub remaining: usize,
}

#[async_trait]
impl Ticker for CountdownTicker {
    async fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}
