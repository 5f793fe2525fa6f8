//! Monitor config loader.

pub mod schema;

use std::fs;

use pipewatch_core::error::{PipewatchError, Result};

pub use schema::{MonitorConfig, MonitorSection, PrometheusSection};

/// Default config location when none is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

pub fn load_from_file(path: &str) -> Result<MonitorConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| PipewatchError::Config(format!("read {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<MonitorConfig> {
    let cfg: MonitorConfig = serde_yaml::from_str(s)
        .map_err(|e| PipewatchError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
