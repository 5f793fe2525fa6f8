use std::io::Write;

use async_trait::async_trait;

use pipewatch_core::error::{PipewatchError, Result};
use pipewatch_core::Alert;

use super::AlertSink;

pub const ALERT_PREFIX: &str = "ALERT: ";

/// Writes `ALERT: <message>` lines to stdout.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }

    pub fn format(alert: &Alert) -> String {
        format!("{ALERT_PREFIX}{alert}")
    }
}

#[async_trait]
impl AlertSink for ConsoleSink {
    fn name(&self) -> &'static str {
        "console"
    }

    async fn send(&self, alert: &Alert) -> Result<()> {
        tracing::warn!(alert = %alert, "threshold exceeded");

        let mut out = std::io::stdout().lock();
        writeln!(out, "{}", Self::format(alert))
            .map_err(|e| PipewatchError::Alert(format!("stdout: {e}")))
    }
}
