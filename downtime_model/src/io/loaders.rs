use anyhow::{Context, Result};
use log::info;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::algorithms::{
    default_tiers, DowntimeSchedule, EventTier, IntervalSet, SeedSource, UnscheduledDowntime,
    DEFAULT_SURVEY_LENGTH,
};
use crate::core::domain::DowntimeEvent;
use crate::error::DowntimeResult;
use crate::models::ModifiedJulianDate;
use crate::parsing::scheduled_parser;
use crate::time::{NightClock, DEFAULT_START_OF_NIGHT_OFFSET};

/// Packaged scheduled-downtime table covering a 20-year survey.
pub const DEFAULT_SCHEDULED_DOWNTIME_TABLE: &str =
    include_str!("../../data/scheduled_downtime.json");

/// File name reported for the packaged table.
pub const DEFAULT_SCHEDULED_DOWNTIME_FILE: &str = "scheduled_downtime.json";

/// Where a scheduled-downtime table is read from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DowntimeSource {
    /// The table shipped with this crate
    #[default]
    Packaged,
    Json(PathBuf),
    #[cfg(feature = "sqlite-source")]
    Sqlite(PathBuf),
}

impl DowntimeSource {
    /// Pick the source format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .with_context(|| format!("Downtime table has no extension: {}", path.display()))?;

        match extension.to_lowercase().as_str() {
            "json" => Ok(DowntimeSource::Json(path.to_path_buf())),
            #[cfg(feature = "sqlite-source")]
            "db" | "sqlite" | "sqlite3" => Ok(DowntimeSource::Sqlite(path.to_path_buf())),
            _ => anyhow::bail!("Unsupported downtime table format: {}", extension),
        }
    }

    /// Path of the table, or the packaged file name
    pub fn file_name(&self) -> &Path {
        match self {
            DowntimeSource::Packaged => Path::new(DEFAULT_SCHEDULED_DOWNTIME_FILE),
            DowntimeSource::Json(path) => path,
            #[cfg(feature = "sqlite-source")]
            DowntimeSource::Sqlite(path) => path,
        }
    }

    /// Read every row of the table
    pub fn load(&self) -> Result<Vec<DowntimeEvent>> {
        let events = match self {
            DowntimeSource::Packaged => {
                scheduled_parser::parse_scheduled_downtime_str(DEFAULT_SCHEDULED_DOWNTIME_TABLE)
                    .context("Packaged scheduled downtime table is invalid")?
            }
            DowntimeSource::Json(path) => scheduled_parser::parse_scheduled_downtime_file(path)?,
            #[cfg(feature = "sqlite-source")]
            DowntimeSource::Sqlite(path) => scheduled_parser::parse_scheduled_downtime_db(path)?,
        };

        info!("Loaded {} scheduled downtime rows from {}", events.len(), self);
        Ok(events)
    }
}

impl fmt::Display for DowntimeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DowntimeSource::Packaged => write!(f, "packaged {}", DEFAULT_SCHEDULED_DOWNTIME_FILE),
            other => write!(f, "{}", other.file_name().display()),
        }
    }
}

/// Scheduled downtime as a night-indexed queue.
///
/// Empty until [`initialize`](Self::initialize) reads a table.
#[derive(Debug, Clone, Default)]
pub struct ScheduledDowntime {
    source: Option<DowntimeSource>,
    schedule: DowntimeSchedule,
}

impl ScheduledDowntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the table at `path`, or the packaged table when `None`.
    pub fn initialize(&mut self, path: Option<&Path>) -> Result<()> {
        let source = match path {
            Some(path) => DowntimeSource::from_path(path)?,
            None => DowntimeSource::Packaged,
        };
        self.schedule = DowntimeSchedule::new(source.load()?);
        self.source = Some(source);
        Ok(())
    }

    /// Table the downtimes were read from, `None` before initialization.
    pub fn downtime_file(&self) -> Option<&Path> {
        self.source.as_ref().map(DowntimeSource::file_name)
    }

    pub fn pop_earliest(&mut self) -> Option<DowntimeEvent> {
        self.schedule.pop_earliest()
    }

    pub fn len(&self) -> usize {
        self.schedule.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedule.is_empty()
    }

    /// Total remaining scheduled downtime in days.
    pub fn total_downtime(&self) -> u64 {
        self.schedule.total_downtime()
    }

    pub fn downtimes(&self) -> &[DowntimeEvent] {
        self.schedule.remaining()
    }

    pub fn schedule(&self) -> &DowntimeSchedule {
        &self.schedule
    }
}

/// Builds the scheduled-downtime interval set for a survey starting at a given time.
#[derive(Debug, Clone)]
pub struct ScheduledDowntimeData {
    start_time: ModifiedJulianDate,
    clock: NightClock,
    source: DowntimeSource,
}

impl ScheduledDowntimeData {
    /// Packaged table, default start-of-night offset.
    pub fn new(start_time: ModifiedJulianDate) -> Self {
        Self {
            start_time,
            clock: NightClock::new(start_time, DEFAULT_START_OF_NIGHT_OFFSET),
            source: DowntimeSource::Packaged,
        }
    }

    pub fn with_start_of_night_offset(mut self, offset: f64) -> Self {
        self.clock = NightClock::new(self.start_time, offset);
        self
    }

    /// Read from an alternate table instead of the packaged one.
    pub fn with_source_path(mut self, path: &Path) -> Result<Self> {
        self.source = DowntimeSource::from_path(path)?;
        Ok(self)
    }

    pub fn night0(&self) -> ModifiedJulianDate {
        self.clock.night0()
    }

    pub fn source(&self) -> &DowntimeSource {
        &self.source
    }

    /// Load the table and translate it into calendar time.
    pub fn read_data(&self) -> Result<IntervalSet> {
        let schedule = DowntimeSchedule::new(self.source.load()?);
        IntervalSet::from_events(&schedule, &self.clock)
            .with_context(|| format!("Scheduled downtime from {} is not a valid interval set", self.source))
    }
}

/// Builds the unscheduled-downtime interval set for a survey starting at a given time.
#[derive(Debug, Clone)]
pub struct UnscheduledDowntimeData {
    start_time: ModifiedJulianDate,
    clock: NightClock,
    seed: SeedSource,
    survey_length: u32,
    tiers: Vec<EventTier>,
}

impl UnscheduledDowntimeData {
    /// Default seed, tiers, horizon and start-of-night offset.
    pub fn new(start_time: ModifiedJulianDate) -> Self {
        Self {
            start_time,
            clock: NightClock::new(start_time, DEFAULT_START_OF_NIGHT_OFFSET),
            seed: SeedSource::Default,
            survey_length: DEFAULT_SURVEY_LENGTH,
            tiers: default_tiers(),
        }
    }

    pub fn with_start_of_night_offset(mut self, offset: f64) -> Self {
        self.clock = NightClock::new(self.start_time, offset);
        self
    }

    pub fn with_seed(mut self, seed: SeedSource) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_survey_length(mut self, survey_length: u32) -> Self {
        self.survey_length = survey_length;
        self
    }

    pub fn with_tiers(mut self, tiers: Vec<EventTier>) -> Self {
        self.tiers = tiers;
        self
    }

    pub fn night0(&self) -> ModifiedJulianDate {
        self.clock.night0()
    }

    /// Run the sampler and translate its events into calendar time.
    pub fn make_data(&self) -> DowntimeResult<IntervalSet> {
        let mut sampler = UnscheduledDowntime::new().with_tiers(self.tiers.clone())?;
        sampler.initialize(self.seed, self.survey_length)?;
        info!(
            "Sampled {} unscheduled downtimes (seed {}, {} days lost)",
            sampler.len(),
            sampler.seed(),
            sampler.total_downtime()
        );
        IntervalSet::from_events(sampler.schedule(), &self.clock)
    }
}
