//! Shared application state for the monitor.
//!
//! Holds the loaded config and the metrics registry. Cloned into the HTTP
//! router and handed to the scheduler; both sides share one registry.

use std::sync::Arc;

use crate::config::MonitorConfig;
use crate::obs::PipelineMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metrics: Arc<PipelineMetrics>,
}

struct AppStateInner {
    cfg: MonitorConfig,
}

impl AppState {
    pub fn new(cfg: MonitorConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner { cfg }),
            metrics: Arc::new(PipelineMetrics::new()),
        }
    }

    pub fn cfg(&self) -> &MonitorConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> Arc<PipelineMetrics> {
        Arc::clone(&self.metrics)
    }
}
