//! pipewatch: CI build-log health monitor.
//!
//! - Scrapes the build log on a fixed interval
//! - Exposes per-test durations and the failure count on `/metrics`
//! - Prints `ALERT:` lines when thresholds are exceeded
//!
//! Usage: `pipewatch [config-path]` (default `config.yaml`).

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use pipewatch_monitor::{bootstrap, config};

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout is reserved for alert and status lines.
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());

    let result = match bootstrap::start(&path).await {
        Ok(running) => running.run_forever().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.kind().as_str(), error = %e, "pipewatch stopped");
            ExitCode::FAILURE
        }
    }
}
