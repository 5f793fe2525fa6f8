//! In-process metrics for the pipeline monitor.
//!
//! Gauges are stored as atomics and rendered by the `/metrics` handler in the
//! Prometheus text format. The scheduler is the only writer; scrape requests
//! read concurrently.

pub mod metrics;

pub use metrics::{Gauge, GaugeVec, PipelineMetrics};
