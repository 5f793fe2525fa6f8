#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::path::Path;
use std::sync::Arc;

use std::time::Instant;

use tokio::time::{timeout, Duration};

use pipewatch_core::{AlertKind, ErrorKind};
use pipewatch_monitor::alert::{AlertHub, ConsoleSink};
use pipewatch_monitor::obs::PipelineMetrics;
use pipewatch_monitor::scheduler::{write_status, IntervalTicker, Monitor, Ticker, STATUS_LINE};

use common::{config_for, write_log, BrokenSink, CountdownTicker, RecordingSink};

fn monitor_with(
    log: &Path,
    max_failures: i64,
    max_secs: f64,
    mode: &str,
) -> (Monitor, Arc<PipelineMetrics>, Arc<RecordingSink>) {
    let cfg = config_for(log, 0, max_failures, max_secs, mode);
    let metrics = Arc::new(PipelineMetrics::new());
    let sink = Arc::new(RecordingSink::default());
    let hub = AlertHub::new().with_sink(sink.clone());
    let monitor = Monitor::new(&cfg, Arc::clone(&metrics), hub).unwrap();
    (monitor, metrics, sink)
}

#[tokio::test]
async fn failing_build_with_slow_test_alerts_twice() {
    let mut log = tempfile::NamedTempFile::new().unwrap();
    write_log(&mut log, "Finished: FAILURE\nTestcase: login time=6.2s\n");
    let (monitor, metrics, sink) = monitor_with(log.path(), 0, 5.0, "fail");

    let report = monitor.run_cycle().await.unwrap();

    assert_eq!(report.scrape.failure_count, 1);
    assert_eq!(report.alerts.len(), 2);
    assert_eq!(report.delivered, 2);
    assert_eq!(
        sink.taken(),
        vec![
            "Failure count exceeded threshold: 1 > 0".to_string(),
            "Test login execution time exceeded threshold: 6.2s > 5.0s".to_string(),
        ]
    );
    assert_eq!(metrics.failure_count.get(), 1.0);
    assert_eq!(metrics.test_time("login"), Some(6.2));
}

#[tokio::test]
async fn fast_test_sets_gauge_without_alert() {
    let mut log = tempfile::NamedTempFile::new().unwrap();
    write_log(&mut log, "Testcase: checkout time=3.0s\n");
    let (monitor, metrics, sink) = monitor_with(log.path(), 0, 5.0, "fail");

    let report = monitor.run_cycle().await.unwrap();

    assert!(report.alerts.is_empty());
    assert!(sink.taken().is_empty());
    assert_eq!(metrics.test_time("checkout"), Some(3.0));
    assert_eq!(metrics.failure_count.get(), 0.0);
}

#[tokio::test]
async fn still_over_threshold_realerts_every_cycle() {
    let mut log = tempfile::NamedTempFile::new().unwrap();
    write_log(&mut log, "Finished: FAILURE\n");
    let (monitor, _metrics, sink) = monitor_with(log.path(), 0, 5.0, "fail");

    let cycles = monitor.run(CountdownTicker { remaining: 3 }).await.unwrap();

    assert_eq!(cycles, 3);
    assert_eq!(sink.taken().len(), 3);
}

#[tokio::test]
async fn each_cycle_reflects_only_current_log() {
    let mut log = tempfile::NamedTempFile::new().unwrap();
    write_log(&mut log, "Testcase: login time=9.0s\nTestcase: search time=1.0s\nFinished: FAILURE\n");
    let (monitor, metrics, sink) = monitor_with(log.path(), 0, 5.0, "fail");

    monitor.run_cycle().await.unwrap();
    assert_eq!(sink.taken().len(), 2);

    write_log(&mut log, "Testcase: login time=2.0s\n");
    let report = monitor.run_cycle().await.unwrap();

    assert!(report.alerts.is_empty());
    assert!(sink.taken().is_empty());
    assert_eq!(metrics.test_time("login"), Some(2.0));
    assert_eq!(metrics.test_time("search"), None);
    assert_eq!(metrics.failure_count.get(), 0.0);
}

#[tokio::test]
async fn missing_log_stops_the_loop() {
    let (monitor, _metrics, sink) =
        monitor_with(Path::new("does/not/exist.log"), 0, 5.0, "fail");

    let err = monitor
        .run(CountdownTicker { remaining: 5 })
        .await
        .expect_err("must fail");

    assert_eq!(err.kind(), ErrorKind::Parse);
    assert!(sink.taken().is_empty());
}

#[tokio::test]
async fn malformed_duration_fails_or_skips_per_config() {
    let mut log = tempfile::NamedTempFile::new().unwrap();
    write_log(&mut log, "Testcase: login time=abcs\nTestcase: slow time=8.0s\n");

    let (strict, metrics, _) = monitor_with(log.path(), 0, 5.0, "fail");
    let err = strict.run_cycle().await.expect_err("must fail");
    assert_eq!(err.kind(), ErrorKind::InvalidDuration);
    assert!(metrics.test_execution_time.is_empty());

    let (lenient, metrics, sink) = monitor_with(log.path(), 0, 5.0, "skip");
    let report = lenient.run_cycle().await.unwrap();
    assert_eq!(report.scrape.skipped_lines, 1);
    assert!(matches!(&report.alerts[0].kind, AlertKind::SlowTest { test, .. } if test == "slow"));
    assert_eq!(sink.taken().len(), 1);
    assert_eq!(metrics.test_time("slow"), Some(8.0));
}

#[tokio::test]
async fn broken_sink_does_not_block_others() {
    let mut log = tempfile::NamedTempFile::new().unwrap();
    write_log(&mut log, "Finished: FAILURE\n");
    let cfg = config_for(log.path(), 0, 0, 5.0, "fail");
    let sink = Arc::new(RecordingSink::default());
    let hub = AlertHub::new()
        .with_sink(Arc::new(BrokenSink))
        .with_sink(sink.clone());
    assert_eq!(hub.sink_names(), vec!["broken", "recording"]);

    let monitor = Monitor::new(&cfg, Arc::new(PipelineMetrics::new()), hub).unwrap();
    let report = monitor.run_cycle().await.unwrap();

    assert_eq!(report.alerts.len(), 1);
    assert_eq!(report.delivered, 1);
    assert_eq!(sink.taken().len(), 1);
}

#[test]
fn console_line_format() {
    let alert = pipewatch_core::Alert {
        kind: AlertKind::FailureCount { count: 4, max: 1 },
    };
    assert_eq!(
        ConsoleSink::format(&alert),
        "ALERT: Failure count exceeded threshold: 4 > 1"
    );
}

#[tokio::test]
async fn negative_thresholds_alert_every_cycle() {
    let mut log = tempfile::NamedTempFile::new().unwrap();
    write_log(&mut log, "Testcase: noop time=0.0s\n");
    let (monitor, _metrics, sink) = monitor_with(log.path(), -1, -1.0, "fail");

    let cycles = monitor.run(CountdownTicker { remaining: 2 }).await.unwrap();

    assert_eq!(cycles, 2);
    let msgs = sink.taken();
    assert_eq!(msgs.len(), 4);
    assert_eq!(msgs[0], "Failure count exceeded threshold: 0 > -1");
    assert_eq!(
        msgs[1],
        "Test noop execution time exceeded threshold: 0.0s > -1.0s"
    );
    assert_eq!(msgs[0..2], msgs[2..4]);
}

#[test]
fn status_line_goes_to_writer() {
    let mut buf = Vec::new();
    write_status(&mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), format!("{STATUS_LINE}\n"));
}

struct ClosedPipe;

impl std::io::Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn status_line_write_failure_is_an_error() {
    let err = write_status(&mut ClosedPipe).expect_err("must fail");
    assert_eq!(err.kind(), ErrorKind::Internal);
}

#[tokio::test]
async fn interval_ticker_first_tick_is_immediate() {
    let mut ticker = IntervalTicker::new(Duration::from_secs(3600));
    let ticked = timeout(Duration::from_secs(5), ticker.tick()).await.unwrap();
    assert!(ticked);
}

#[tokio::test]
async fn interval_ticker_sleeps_full_period_after_slow_cycle() {
    let period = Duration::from_millis(400);
    let mut ticker = IntervalTicker::new(period);
    assert!(ticker.tick().await);

    // A cycle that eats most of the period.
    std::thread::sleep(Duration::from_millis(300));

    let cycle_end = Instant::now();
    assert!(ticker.tick().await);
    assert!(cycle_end.elapsed() >= period, "gap {:?}", cycle_end.elapsed());
}
