//! Error Types for the Macro Watchdog

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WatchdogError>;

#[derive(Error, Debug)]
pub enum WatchdogError {
    #[error("Feed error: {0}")]
    Feed(String),

    #[error("No observations found for {0}")]
    NoData(String),

    #[error("Unsupported symbol: {0}")]
    UnsupportedSymbol(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<WatchdogError> for audit_core::AuditError {
    fn from(err: WatchdogError) -> Self {
        audit_core::AuditError::ToolExecution(err.to_string())
    }
}
