//! Top-level facade crate for pipewatch.
//!
//! Re-exports the core primitives and the monitor service so users can depend on a single crate.

pub mod core {
    pub use pipewatch_core::*;
}

pub mod monitor {
    pub use pipewatch_monitor::*;
}
