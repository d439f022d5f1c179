//! Simulation configuration file support.
//!
//! A single TOML file describes the status engine keys, the survey start, the
//! scheduled-downtime table and the unscheduled-downtime seed:
//!
//! ```toml
//! [model]
//! efd_columns = ["scheduled_downtimes", "unscheduled_downtimes"]
//! target_columns = ["time"]
//!
//! [survey]
//! start_time = "2022-10-01"
//! start_of_night_offset = -0.34
//! length = 7300
//!
//! [scheduled]
//! source = "tables/maintenance.db"
//!
//! [unscheduled]
//! seed = "wall_clock"
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::algorithms::{SeedSource, DEFAULT_SURVEY_LENGTH};
use crate::error::{DowntimeError, DowntimeResult};
use crate::io::loaders::{ScheduledDowntimeData, UnscheduledDowntimeData};
use crate::models::{DowntimeModelConfig, ModifiedJulianDate};
use crate::services::Telemetry;
use crate::time::{parse_time_str, DEFAULT_START_OF_NIGHT_OFFSET};

/// Simulation configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    #[serde(default)]
    pub model: DowntimeModelConfig,
    pub survey: SurveySettings,
    #[serde(default)]
    pub scheduled: ScheduledSettings,
    #[serde(default)]
    pub unscheduled: UnscheduledSettings,
    /// Directory relative `scheduled.source` paths are resolved against.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// Survey timing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SurveySettings {
    /// MJD number or ISO date/datetime (UTC).
    pub start_time: String,
    #[serde(default = "default_start_of_night_offset")]
    pub start_of_night_offset: f64,
    #[serde(default = "default_survey_length")]
    pub length: u32,
}

/// Scheduled downtime table settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduledSettings {
    /// Alternate table (`.json` or SQLite); the packaged table when absent.
    #[serde(default)]
    pub source: Option<PathBuf>,
}

/// Unscheduled downtime settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnscheduledSettings {
    #[serde(default)]
    pub seed: SeedSetting,
}

/// `"default"`, `"wall_clock"` or an explicit 32-bit seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeedSetting {
    Value(u32),
    Keyword(String),
}

impl Default for SeedSetting {
    fn default() -> Self {
        SeedSetting::Keyword("default".to_string())
    }
}

impl SeedSetting {
    pub fn to_seed_source(&self) -> DowntimeResult<SeedSource> {
        match self {
            SeedSetting::Value(seed) => Ok(SeedSource::Explicit(*seed)),
            SeedSetting::Keyword(keyword) => match keyword.as_str() {
                "default" => Ok(SeedSource::Default),
                "wall_clock" | "time" => Ok(SeedSource::WallClock),
                other => Err(DowntimeError::ConfigurationError(format!(
                    "unscheduled.seed must be \"default\", \"wall_clock\" or an integer, got \"{}\"",
                    other
                ))),
            },
        }
    }
}

fn default_start_of_night_offset() -> f64 {
    DEFAULT_START_OF_NIGHT_OFFSET
}

fn default_survey_length() -> u32 {
    DEFAULT_SURVEY_LENGTH
}

impl SimulationConfig {
    /// Load simulation configuration from a TOML file.
    ///
    /// # Returns
    /// * `Ok(SimulationConfig)` if the file parses and validates
    /// * `Err(DowntimeError::ConfigurationError)` otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> DowntimeResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            DowntimeError::ConfigurationError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut config = Self::from_toml_str(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Parse and validate simulation configuration from TOML text.
    pub fn from_toml_str(content: &str) -> DowntimeResult<Self> {
        let deserializer = toml::Deserializer::new(content);
        let config: SimulationConfig =
            serde_path_to_error::deserialize(deserializer).map_err(|e| {
                DowntimeError::ConfigurationError(format!(
                    "Failed to parse config file at '{}': {}",
                    e.path(),
                    e.inner()
                ))
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DowntimeResult<()> {
        self.model.validate()?;
        self.start_time()?;
        self.seed_source()?;
        if !self.survey.start_of_night_offset.is_finite() {
            return Err(DowntimeError::ConfigurationError(
                "survey.start_of_night_offset must be a finite number of days".to_string(),
            ));
        }
        Ok(())
    }

    /// Parsed survey start.
    pub fn start_time(&self) -> DowntimeResult<ModifiedJulianDate> {
        parse_time_str(&self.survey.start_time).ok_or_else(|| {
            DowntimeError::ConfigurationError(format!(
                "survey.start_time '{}' is neither an MJD nor an ISO date",
                self.survey.start_time
            ))
        })
    }

    pub fn seed_source(&self) -> DowntimeResult<SeedSource> {
        self.unscheduled.seed.to_seed_source()
    }

    /// Scheduled table path, resolved against the config file directory.
    pub fn scheduled_source(&self) -> Option<PathBuf> {
        let source = self.scheduled.source.as_ref()?;
        match &self.base_dir {
            Some(base) if source.is_relative() => Some(base.join(source)),
            _ => Some(source.clone()),
        }
    }

    pub fn scheduled_data(&self) -> Result<ScheduledDowntimeData> {
        let mut data = ScheduledDowntimeData::new(self.start_time()?)
            .with_start_of_night_offset(self.survey.start_of_night_offset);
        if let Some(path) = self.scheduled_source() {
            data = data.with_source_path(&path)?;
        }
        Ok(data)
    }

    pub fn unscheduled_data(&self) -> DowntimeResult<UnscheduledDowntimeData> {
        Ok(UnscheduledDowntimeData::new(self.start_time()?)
            .with_start_of_night_offset(self.survey.start_of_night_offset)
            .with_seed(self.seed_source()?)
            .with_survey_length(self.survey.length))
    }

    /// Load both interval sets, keyed by the model's telemetry columns.
    pub fn build_telemetry(&self) -> Result<Telemetry> {
        let mut telemetry = Telemetry::new();
        telemetry.insert(
            self.model.scheduled_column().to_string(),
            self.scheduled_data()?.read_data()?,
        );
        telemetry.insert(
            self.model.unscheduled_column().to_string(),
            self.unscheduled_data()?.make_data()?,
        );
        Ok(telemetry)
    }
}
