//! Error types for downtime model operations.

use crate::models::ModifiedJulianDate;

/// Result type for downtime model operations
pub type DowntimeResult<T> = Result<T, DowntimeError>;

/// Error type for downtime model operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DowntimeError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Missing telemetry column: {0}")]
    MissingTelemetry(String),

    #[error("Missing target value: {0}")]
    MissingTarget(String),

    #[error("Query instant must be a finite MJD, got {0}")]
    InvalidInstant(f64),

    #[error("No scheduled downtime starts after MJD {}", .0.value())]
    NoUpcomingDowntime(ModifiedJulianDate),

    #[error("Unscheduled downtime already initialized; reset() before sampling again")]
    AlreadyInitialized,

    #[error("Seed error: {0}")]
    SeedError(String),
}
