//! pipewatch core: runtime-agnostic primitives for build-log health checks.
//!
//! This crate owns the error surface, the build-log line matcher and scraper,
//! and threshold evaluation. It carries no async runtime or HTTP dependencies so
//! the same logic can be driven from the monitor service or from tests directly.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed logs surface as `PipewatchError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod log;
pub mod threshold;

/// Shared result type.
pub use error::{ErrorKind, PipewatchError, Result};
pub use log::{MalformedDuration, Scrape, TestTimings};
pub use threshold::{Alert, AlertKind, Thresholds};
