use crate::config::ConfigError;
use crate::credit::{InvalidCategory, NotQualified};
use crate::telemetry::TelemetryError;

/// Failures surfaced at the process boundary (server bootstrap and CLI commands).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("classification error: {0}")]
    Classification(#[from] NotQualified),
    #[error("invalid input: {0}")]
    Category(#[from] InvalidCategory),
}
