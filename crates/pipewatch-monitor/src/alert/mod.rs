//! Alert delivery.
//!
//! A cycle hands its alerts to an [`AlertHub`], which fans each one out to
//! every registered [`AlertSink`]. Only the console sink ships today; chat or
//! mail channels plug in by implementing the trait.

pub mod console;

use std::sync::Arc;

use async_trait::async_trait;

use pipewatch_core::error::Result;
use pipewatch_core::Alert;

pub use console::ConsoleSink;

/// A notification channel.
#[async_trait]
pub trait AlertSink: Send + Sync {
    fn name(&self) -> &'static str;
    async fn send(&self, alert: &Alert) -> Result<()>;
}

/// Ordered set of sinks. No retry, batching, or dedup.
#[derive(Clone, Default)]
pub struct AlertHub {
    sinks: Vec<Arc<dyn AlertSink>>,
}

impl AlertHub {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Hub with the stdout sink only.
    pub fn console() -> Self {
        Self::new().with_sink(Arc::new(ConsoleSink::new()))
    }

    pub fn with_sink(mut self, sink: Arc<dyn AlertSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn sink_names(&self) -> Vec<&'static str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }

    /// Deliver every alert to every sink, in order.
    /// A failing sink is logged and skipped. Returns successful deliveries.
    pub async fn deliver(&self, alerts: &[Alert]) -> usize {
        let mut delivered = 0;
        for alert in alerts {
            for sink in &self.sinks {
                match sink.send(alert).await {
                    Ok(()) => delivered += 1,
                    Err(e) => {
                        tracing::error!(
                            sink = sink.name(),
                            code = e.kind().as_str(),
                            error = %e,
                            "alert delivery failed"
                        );
                    }
                }
            }
        }
        delivered
    }
}
