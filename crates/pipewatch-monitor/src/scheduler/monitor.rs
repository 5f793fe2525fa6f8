use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::time::Duration;

use pipewatch_core::error::{PipewatchError, Result};
use pipewatch_core::log::Scraper;
use pipewatch_core::{Alert, Scrape, Thresholds};

use crate::alert::AlertHub;
use crate::config::MonitorConfig;
use crate::obs::PipelineMetrics;

use super::ticker::Ticker;

/// Printed to stdout after every completed cycle.
pub const STATUS_LINE: &str = "Metrics updated and thresholds checked.";

/// Write the per-cycle status line.
pub fn write_status<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "{STATUS_LINE}")
        .map_err(|e| PipewatchError::Internal(format!("status line: {e}")))
}

/// Outcome of one cycle.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub scrape: Scrape,
    pub alerts: Vec<Alert>,
    pub delivered: usize,
}

pub struct Monitor {
    scraper: Arc<Scraper>,
    log_path: PathBuf,
    thresholds: Thresholds,
    interval: Duration,
    metrics: Arc<PipelineMetrics>,
    alerts: AlertHub,
}

impl Monitor {
    pub fn new(
        cfg: &MonitorConfig,
        metrics: Arc<PipelineMetrics>,
        alerts: AlertHub,
    ) -> Result<Self> {
        Ok(Self {
            scraper: Arc::new(Scraper::new(cfg.monitor.malformed_duration)?),
            log_path: cfg.monitor.log_path.clone(),
            thresholds: cfg.thresholds.clone(),
            interval: cfg.monitor.interval(),
            metrics,
            alerts,
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn log_path(&self) -> &PathBuf {
        &self.log_path
    }

    /// One scrape -> record -> check -> alert pass.
    pub async fn run_cycle(&self) -> Result<CycleReport> {
        let scraper = Arc::clone(&self.scraper);
        let path = self.log_path.clone();
        let scrape = tokio::task::spawn_blocking(move || scraper.scrape_file(&path))
            .await
            .map_err(|e| PipewatchError::Internal(format!("scrape task failed: {e}")))??;

        self.metrics.record(&scrape);

        let alerts = self.thresholds.evaluate(&scrape);
        let delivered = self.alerts.deliver(&alerts).await;

        tracing::debug!(
            tests = scrape.timings.len(),
            failures = scrape.failure_count,
            skipped = scrape.skipped_lines,
            alerts = alerts.len(),
            "cycle complete"
        );
        write_status(&mut std::io::stdout().lock())?;

        Ok(CycleReport { scrape, alerts, delivered })
    }

    /// Run cycles until the ticker stops or a cycle fails.
    /// Returns the number of completed cycles.
    pub async fn run<T: Ticker>(&self, mut ticker: T) -> Result<u64> {
        let mut cycles = 0;
        while ticker.tick().await {
            if let Err(e) = self.run_cycle().await {
                tracing::error!(code = e.kind().as_str(), error = %e, cycles, "cycle failed");
                return Err(e);
            }
            cycles += 1;
        }
        Ok(cycles)
    }
}
