//! Threshold evaluation.
//!
//! Compares one [`Scrape`] against configured limits. Every call is
//! independent: there is no suppression, so a condition that stays over its
//! limit alerts again on every cycle.

use std::fmt;

use serde::Deserialize;

use crate::log::Scrape;

/// Configured limits. Both comparisons are strict `>`.
///
/// Any number is accepted: a negative limit alerts on every cycle, and an
/// infinite or NaN time limit never does.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Thresholds {
    pub max_failure_count: i64,
    pub max_test_execution_time: f64,
}

/// Which limit an alert is about.
#[derive(Debug, Clone, PartialEq)]
pub enum AlertKind {
    FailureCount { count: u64, max: i64 },
    SlowTest { test: String, secs: f64, max: f64 },
}

/// One alert raised by a cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
}

impl Alert {
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Seconds always keep a fractional part (`5.0`, not `5`).
struct Secs(f64);

impl fmt::Display for Secs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            AlertKind::FailureCount { count, max } => {
                write!(f, "Failure count exceeded threshold: {count} > {max}")
            }
            AlertKind::SlowTest { test, secs, max } => write!(
                f,
                "Test {test} execution time exceeded threshold: {}s > {}s",
                Secs(*secs),
                Secs(*max)
            ),
        }
    }
}

impl Thresholds {
    /// Failure count first, then slow tests in name order.
    pub fn evaluate(&self, scrape: &Scrape) -> Vec<Alert> {
        let mut alerts = Vec::new();

        let count = i64::try_from(scrape.failure_count).unwrap_or(i64::MAX);
        if count > self.max_failure_count {
            alerts.push(Alert {
                kind: AlertKind::FailureCount {
                    count: scrape.failure_count,
                    max: self.max_failure_count,
                },
            });
        }

        for (test, &secs) in &scrape.timings {
            if secs > self.max_test_execution_time {
                alerts.push(Alert {
                    kind: AlertKind::SlowTest {
                        test: test.clone(),
                        secs,
                        max: self.max_test_execution_time,
                    },
                });
            }
        }

        alerts
    }
}
