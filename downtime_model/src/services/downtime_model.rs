use log::debug;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::algorithms::IntervalSet;
use crate::error::{DowntimeError, DowntimeResult};
use crate::models::{DowntimeModelConfig, ModifiedJulianDate, Provenance};

/// Downtime interval sets keyed by telemetry column name.
pub type Telemetry = HashMap<String, IntervalSet>;

/// Query instants keyed by target column name.
pub type TargetMap = HashMap<String, ModifiedJulianDate>;

/// Observatory downtime state at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DowntimeStatus {
    /// Whether any downtime covers the instant.
    pub status: bool,
    /// Latest end among the covering downtimes.
    pub end: Option<ModifiedJulianDate>,
    /// Start of the next scheduled downtime.
    pub next: ModifiedJulianDate,
}

/// Combines scheduled and unscheduled downtime into a single status.
#[derive(Debug, Clone)]
pub struct DowntimeModel {
    config: DowntimeModelConfig,
    provenance: Provenance,
}

impl DowntimeModel {
    /// Build a model from `config`, or the default configuration when `None`.
    pub fn new(config: Option<DowntimeModelConfig>) -> DowntimeResult<Self> {
        let config = config.unwrap_or_default();
        config.validate()?;
        Ok(Self {
            config,
            provenance: Provenance::current(),
        })
    }

    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }

    pub fn config(&self) -> &DowntimeModelConfig {
        &self.config
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    /// Telemetry columns consumed and the look-back window they need.
    pub fn efd_requirements(&self) -> (&[String], f64) {
        (&self.config.efd_columns, self.config.efd_delta_time)
    }

    pub fn target_requirements(&self) -> &[String] {
        &self.config.target_columns
    }

    /// Version, fingerprint and configuration, in that order.
    pub fn config_info(&self) -> Map<String, Value> {
        let mut info = Map::new();
        info.insert(
            "DowntimeModel_version".to_string(),
            Value::String(self.provenance.version.clone()),
        );
        info.insert(
            "DowntimeModel_sha".to_string(),
            Value::String(self.provenance.fingerprint.clone()),
        );
        info.insert(
            "efd_columns".to_string(),
            Value::from(self.config.efd_columns.clone()),
        );
        info.insert(
            "efd_delta_time".to_string(),
            Value::from(self.config.efd_delta_time),
        );
        info.insert(
            "target_columns".to_string(),
            Value::from(self.config.target_columns.clone()),
        );
        info
    }

    /// Downtime status for the instant found in `target`.
    ///
    /// # Errors
    /// * `MissingTelemetry` if either downtime column is absent from `efd`
    /// * `MissingTarget` if the time column is absent from `target`
    /// * `InvalidInstant` if the instant is not a finite MJD
    /// * `NoUpcomingDowntime` if no scheduled downtime starts after the instant
    pub fn status(&self, efd: &Telemetry, target: &TargetMap) -> DowntimeResult<DowntimeStatus> {
        let scheduled = lookup_telemetry(efd, self.config.scheduled_column())?;
        let unscheduled = lookup_telemetry(efd, self.config.unscheduled_column())?;
        let time_column = self.config.time_column();
        let t = target
            .get(time_column)
            .copied()
            .ok_or_else(|| DowntimeError::MissingTarget(time_column.to_string()))?;

        self.status_at(scheduled, unscheduled, t)
    }

    /// Downtime status at `t`.
    ///
    /// Unscheduled downtime never contributes to `next`. A NaN or infinite
    /// `t` is rejected with `InvalidInstant`.
    pub fn status_at(
        &self,
        scheduled: &IntervalSet,
        unscheduled: &IntervalSet,
        t: ModifiedJulianDate,
    ) -> DowntimeResult<DowntimeStatus> {
        if !t.value().is_finite() {
            return Err(DowntimeError::InvalidInstant(t.value()));
        }

        let current_scheduled = scheduled.current_at(t);
        let next = scheduled
            .next_starting_after(t)
            .map(|interval| interval.start)
            .ok_or(DowntimeError::NoUpcomingDowntime(t))?;
        let current_unscheduled = unscheduled.current_at(t);

        let end = match (current_scheduled, current_unscheduled) {
            (Some(s), Some(u)) => Some(s.end.max(u.end)),
            (Some(s), None) => Some(s.end),
            (None, Some(u)) => Some(u.end),
            (None, None) => None,
        };

        debug!(
            "Downtime status at MJD {} ({}): down={}, end={:?}, next={}",
            t.value(),
            t.to_datetime().format("%Y-%m-%d %H:%M:%S"),
            end.is_some(),
            end.map(|e| e.value()),
            next.value()
        );

        Ok(DowntimeStatus {
            status: end.is_some(),
            end,
            next,
        })
    }
}

fn lookup_telemetry<'a>(efd: &'a Telemetry, column: &str) -> DowntimeResult<&'a IntervalSet> {
    efd.get(column)
        .ok_or_else(|| DowntimeError::MissingTelemetry(column.to_string()))
}
