//! Polling loop.
//!
//! A [`Ticker`] paces cycles; [`Monitor`] runs one cycle per tick:
//! scrape log -> record metrics -> evaluate thresholds -> deliver alerts.
//! Cycles never overlap and carry no state into the next one.

pub mod monitor;
pub mod ticker;

pub use monitor::{write_status, CycleReport, Monitor, STATUS_LINE};
pub use ticker::{IntervalTicker, Ticker};
