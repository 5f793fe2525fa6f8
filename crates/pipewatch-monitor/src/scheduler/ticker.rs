use async_trait::async_trait;
use tokio::time::Duration;

/// Paces the monitor loop. Returning `false` ends the loop.
#[async_trait]
pub trait Ticker: Send {
    async fn tick(&mut self) -> bool;
}

/// Sleeps the full period between cycles. First tick fires immediately.
///
/// `tick` is awaited after a cycle finishes, so the gap between cycles is the
/// cycle's own work time plus `period`. Slow cycles push later ones back;
/// nothing is caught up.
pub struct IntervalTicker {
    period: Duration,
    started: bool,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        Self { period, started: false }
    }
}

#[async_trait]
impl Ticker for IntervalTicker {
    async fn tick(&mut self) -> bool {
        if self.started {
            tokio::time::sleep(self.period).await;
        } else {
            self.started = true;
        }
        true
    }
}
