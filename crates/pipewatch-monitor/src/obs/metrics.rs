//! f64 gauges with optional labels, backed by `DashMap`.
//!
//! Values are kept as `f64` bit patterns in `AtomicU64`. Labels are flattened
//! into sorted key vectors and series are rendered in sorted order so the
//! output is deterministic.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use pipewatch_core::Scrape;

pub const TEST_EXECUTION_TIME: &str = "test_execution_time_seconds";
pub const PIPELINE_FAILURE_COUNT: &str = "pipeline_failure_count";
pub const TEST_NAME_LABEL: &str = "test_name";

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Sample value in exposition syntax.
fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".into()
    } else if v == f64::INFINITY {
        "+Inf".into()
    } else if v == f64::NEG_INFINITY {
        "-Inf".into()
    } else {
        format!("{v:?}")
    }
}

fn label_key(labels: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut key: Vec<(String, String)> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn write_header(out: &mut String, name: &str, help: &str) {
    let _ = writeln!(out, "# HELP {} {}", name, help);
    let _ = writeln!(out, "# TYPE {} gauge", name);
}

/// Unlabeled gauge. Starts at 0.
#[derive(Default)]
pub struct Gauge {
    bits: AtomicU64,
}

impl Gauge {
    pub fn set(&self, v: f64) {
        self.bits.store(v.to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        write_header(out, name, help);
        let _ = writeln!(out, "{} {}", name, format_value(self.get()));
    }
}

#[derive(Default)]
pub struct GaugeVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl GaugeVec {
    /// Overwrite the series for `labels`, creating it if needed.
    pub fn set(&self, labels: &[(&str, &str)], v: f64) {
        let gauge = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        gauge.store(v.to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self, labels: &[(&str, &str)]) -> Option<f64> {
        self.map
            .get(&label_key(labels))
            .map(|g| f64::from_bits(g.load(Ordering::Relaxed)))
    }

    /// Drop every series for which `keep` returns false.
    pub fn retain<F>(&self, mut keep: F)
    where
        F: FnMut(&[(String, String)]) -> bool,
    {
        self.map.retain(|key, _| keep(key));
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, name: &str, help: &str, out: &mut String) {
        write_header(out, name, help);

        let mut rows: Vec<(Vec<(String, String)>, f64)> = self
            .map
            .iter()
            .map(|r| (r.key().clone(), f64::from_bits(r.value().load(Ordering::Relaxed))))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));

        for (key, val) in rows {
            let label_str = key
                .iter()
                .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                .collect::<Vec<_>>()
                .join(",");
            let _ = writeln!(out, "{}{{{}}} {}", name, label_str, format_value(val));
        }
    }
}

/// The two gauges exported by the monitor.
#[derive(Default)]
pub struct PipelineMetrics {
    pub test_execution_time: GaugeVec,
    pub failure_count: Gauge,
}

impl PipelineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish one scrape. Test series missing from `scrape` are removed.
    pub fn record(&self, scrape: &Scrape) {
        for (test, &secs) in &scrape.timings {
            self.test_execution_time.set(&[(TEST_NAME_LABEL, test)], secs);
        }
        self.test_execution_time.retain(|key| {
            key.iter()
                .any(|(k, v)| k == TEST_NAME_LABEL && scrape.timings.contains_key(v))
        });

        self.failure_count.set(scrape.failure_count as f64);
    }

    pub fn test_time(&self, test: &str) -> Option<f64> {
        self.test_execution_time.get(&[(TEST_NAME_LABEL, test)])
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.test_execution_time.render(
            TEST_EXECUTION_TIME,
            "Test execution time in seconds",
            &mut out,
        );
        self.failure_count.render(
            PIPELINE_FAILURE_COUNT,
            "Number of pipeline failures",
            &mut out,
        );
        out
    }
}
