//! Shared error type across pipewatch crates.

use thiserror::Error;

/// Stable error kinds (used by tests and log fields).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Config file missing, unreadable, malformed, or failing validation.
    Config,
    /// Build log could not be opened or read.
    Parse,
    /// A testcase line carried a duration that is not a float.
    InvalidDuration,
    /// Metrics endpoint could not bind its port.
    Bind,
    /// An alert sink failed to deliver.
    Alert,
    /// Anything else.
    Internal,
}

impl ErrorKind {
    /// String code used in log fields and assertions.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Config => "CONFIG_ERROR",
            ErrorKind::Parse => "PARSE_ERROR",
            ErrorKind::InvalidDuration => "INVALID_DURATION",
            ErrorKind::Bind => "BIND_ERROR",
            ErrorKind::Alert => "ALERT_ERROR",
            ErrorKind::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, PipewatchError>;

/// Unified error type used by core and monitor.
#[derive(Debug, Error)]
pub enum PipewatchError {
    #[error("config error: {0}")]
    Config(String),
    #[error("log read failed: {0}")]
    LogRead(String),
    #[error("invalid duration {raw:?} for test {test:?}")]
    InvalidDuration { test: String, raw: String },
    #[error("bind failed: {0}")]
    Bind(String),
    #[error("alert delivery failed: {0}")]
    Alert(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl PipewatchError {
    /// Map to a stable error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipewatchError::Config(_) => ErrorKind::Config,
            PipewatchError::LogRead(_) => ErrorKind::Parse,
            PipewatchError::InvalidDuration { .. } => ErrorKind::InvalidDuration,
            PipewatchError::Bind(_) => ErrorKind::Bind,
            PipewatchError::Alert(_) => ErrorKind::Alert,
            PipewatchError::Internal(_) => ErrorKind::Internal,
        }
    }
}
