//! Downtime model configuration.
//!
//! [`DowntimeModelConfig`] names the telemetry and target keys the status engine
//! reads. It is validated once when a [`crate::services::DowntimeModel`] is built
//! and is immutable afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{DowntimeError, DowntimeResult};

pub const DEFAULT_SCHEDULED_COLUMN: &str = "scheduled_downtimes";
pub const DEFAULT_UNSCHEDULED_COLUMN: &str = "unscheduled_downtimes";
pub const DEFAULT_TIME_COLUMN: &str = "time";

/// Configuration for the downtime status engine.
///
/// * `efd_columns` - telemetry keys for the scheduled and unscheduled interval sets, in that order
/// * `efd_delta_time` - seconds of telemetry history requested (reported, not used by the engine)
/// * `target_columns` - keys expected in the target map; the first is the query instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DowntimeModelConfig {
    #[serde(default = "default_efd_columns")]
    pub efd_columns: Vec<String>,
    #[serde(default)]
    pub efd_delta_time: f64,
    #[serde(default = "default_target_columns")]
    pub target_columns: Vec<String>,
}

fn default_efd_columns() -> Vec<String> {
    vec![
        DEFAULT_SCHEDULED_COLUMN.to_string(),
        DEFAULT_UNSCHEDULED_COLUMN.to_string(),
    ]
}

fn default_target_columns() -> Vec<String> {
    vec![DEFAULT_TIME_COLUMN.to_string()]
}

impl Default for DowntimeModelConfig {
    fn default() -> Self {
        Self {
            efd_columns: default_efd_columns(),
            efd_delta_time: 0.0,
            target_columns: default_target_columns(),
        }
    }
}

impl DowntimeModelConfig {
    /// Parse a configuration from TOML.
    ///
    /// Type mismatches are reported with the path of the offending key.
    ///
    /// # Examples
    ///
    /// ```
    /// use downtime_model::models::DowntimeModelConfig;
    ///
    /// let config = DowntimeModelConfig::from_toml_str("target_columns = ['test_time']").unwrap();
    /// assert_eq!(config.target_columns, vec!["test_time".to_string()]);
    /// assert!(DowntimeModelConfig::from_toml_str("efd_delta_time = 'soon'").is_err());
    /// ```
    pub fn from_toml_str(content: &str) -> DowntimeResult<Self> {
        let deserializer = toml::Deserializer::new(content);
        let config: DowntimeModelConfig = serde_path_to_error::deserialize(deserializer)
            .map_err(|e| {
                DowntimeError::ConfigurationError(format!(
                    "Invalid model configuration at '{}': {}",
                    e.path(),
                    e.inner()
                ))
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for structural problems.
    pub fn validate(&self) -> DowntimeResult<()> {
        if self.efd_columns.len() != 2 {
            return Err(DowntimeError::ConfigurationError(format!(
                "efd_columns must name exactly two sources (scheduled, unscheduled), got {}",
                self.efd_columns.len()
            )));
        }
        if self.efd_columns.iter().any(|c| c.trim().is_empty()) {
            return Err(DowntimeError::ConfigurationError(
                "efd_columns entries must not be empty".to_string(),
            ));
        }
        if self.efd_columns[0] == self.efd_columns[1] {
            return Err(DowntimeError::ConfigurationError(format!(
                "efd_columns must be distinct, got '{}' twice",
                self.efd_columns[0]
            )));
        }
        if !self.efd_delta_time.is_finite() || self.efd_delta_time < 0.0 {
            return Err(DowntimeError::ConfigurationError(format!(
                "efd_delta_time must be a non-negative number of seconds, got {}",
                self.efd_delta_time
            )));
        }
        if self.target_columns.is_empty() {
            return Err(DowntimeError::ConfigurationError(
                "target_columns must contain at least the time key".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for column in &self.target_columns {
            if column.trim().is_empty() {
                return Err(DowntimeError::ConfigurationError(
                    "target_columns entries must not be empty".to_string(),
                ));
            }
            if !seen.insert(column.as_str()) {
                return Err(DowntimeError::ConfigurationError(format!(
                    "target_columns contains '{}' more than once",
                    column
                )));
            }
        }
        Ok(())
    }

    /// Key of the scheduled interval set in the telemetry map.
    pub fn scheduled_column(&self) -> &str {
        &self.efd_columns[0]
    }

    /// Key of the unscheduled interval set in the telemetry map.
    pub fn unscheduled_column(&self) -> &str {
        &self.efd_columns[1]
    }

    /// Key of the query instant in the target map.
    pub fn time_column(&self) -> &str {
        &self.target_columns[0]
    }
}
