//! Error type for the monitoring crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitoringError {
    #[error("network error: {0}")]
    Network(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("metrics error: {0}")]
    Metrics(String),
}

impl From<Box<dyn std::error::Error>> for MonitoringError {
    fn from(e: Box<dyn std::error::Error>) -> Self {
        MonitoringError::Metrics(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MonitoringError>;
