//! Startup sequence: config -> state -> metrics listener -> monitor.
//!
//! Config errors surface before any socket is opened. A port that cannot be
//! bound surfaces as `Bind`.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use pipewatch_core::error::{PipewatchError, Result};

use crate::alert::AlertHub;
use crate::app_state::AppState;
use crate::config::{self, MonitorConfig};
use crate::router;
use crate::scheduler::{IntervalTicker, Monitor};

/// A started monitor: metrics endpoint serving, loop not yet running.
pub struct Running {
    pub addr: SocketAddr,
    pub monitor: Monitor,
    pub server: JoinHandle<()>,
}

impl Running {
    /// Loop forever on the configured interval. Only returns on error.
    pub async fn run_forever(self) -> Result<()> {
        let ticker = IntervalTicker::new(self.monitor.interval());
        let result = self.monitor.run(ticker).await.map(|_| ());
        self.server.abort();
        result
    }
}

pub async fn start(config_path: &str) -> Result<Running> {
    let cfg = config::load_from_file(config_path)?;
    start_with(cfg, AlertHub::console()).await
}

pub async fn start_with(cfg: MonitorConfig, alerts: AlertHub) -> Result<Running> {
    let state = AppState::new(cfg);
    let monitor = Monitor::new(state.cfg(), state.metrics(), alerts)?;

    let listen = SocketAddr::from(([0, 0, 0, 0], state.cfg().prometheus.port));
    let listener = TcpListener::bind(listen)
        .await
        .map_err(|e| PipewatchError::Bind(format!("{listen}: {e}")))?;
    let addr = listener
        .local_addr()
        .map_err(|e| PipewatchError::Bind(format!("{listen}: {e}")))?;

    let app = router::build_router(state);
    let server = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "metrics server stopped");
        }
    });

    tracing::info!(
        %addr,
        log = %monitor.log_path().display(),
        interval_secs = monitor.interval().as_secs(),
        "pipewatch started"
    );

    Ok(Running { addr, monitor, server })
}
