//! pipewatch monitor library entry.
//!
//! Wires config, the metrics registry and its HTTP endpoint, alert sinks, and
//! the polling loop into one service. Consumed by the binary (`main.rs`) and
//! by integration tests.

pub mod alert;
pub mod app_state;
pub mod bootstrap;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
pub mod scheduler;
