//! Unscheduled downtime sampler.
//!
//! Random failures are drawn night by night over the survey horizon. Each night
//! the tiers are checked rarest first, one uniform draw per tier reached; the
//! first tier whose draw falls below its probability produces an event and the
//! sampler skips past the event plus one rest night.
//!
//! The generator is MT19937 seeded with `init_genrand`, and doubles are built
//! from two 32-bit outputs (27 + 26 bits). For a given seed this yields the same
//! event list as other MT19937-based survey simulators.

use log::debug;
use rand_mt::Mt19937GenRand32;
use serde::{Deserialize, Serialize};

use crate::algorithms::queue::DowntimeSchedule;
use crate::core::domain::{DowntimeCategory, DowntimeEvent};
use crate::error::{DowntimeError, DowntimeResult};

/// Seed used unless another is requested.
pub const DEFAULT_SEED: u32 = 1516231121;

/// Twenty 365-day years.
pub const DEFAULT_SURVEY_LENGTH: u32 = 7300;

/// One severity tier of the unscheduled downtime decision process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTier {
    pub category: DowntimeCategory,
    /// Chance per night that this tier fires, given that rarer tiers did not.
    pub probability: f64,
    pub duration_days: u32,
}

impl EventTier {
    pub fn new(category: DowntimeCategory, probability: f64, duration_days: u32) -> Self {
        Self {
            category,
            probability,
            duration_days,
        }
    }
}

/// Built-in tiers, in the order they are checked.
///
/// | tier         | probability | nights lost | typical cause              |
/// |--------------|-------------|-------------|----------------------------|
/// | catastrophic | 1/3650      | 14          | replace a raft             |
/// | major        | 1/730       | 7           |                            |
/// | intermediate | 2/365       | 3           | filter, rotator, shutter   |
/// | minor        | 5/365       | 1           | power supply failure       |
pub fn default_tiers() -> Vec<EventTier> {
    vec![
        EventTier::new(DowntimeCategory::Catastrophic, 0.000274, 14),
        EventTier::new(DowntimeCategory::Major, 0.00137, 7),
        EventTier::new(DowntimeCategory::Intermediate, 0.00548, 3),
        EventTier::new(DowntimeCategory::Minor, 0.0137, 1),
    ]
}

fn validate_tiers(tiers: &[EventTier]) -> DowntimeResult<()> {
    if tiers.is_empty() {
        return Err(DowntimeError::ConfigurationError(
            "at least one downtime tier is required".to_string(),
        ));
    }
    for tier in tiers {
        if !(0.0..=1.0).contains(&tier.probability) {
            return Err(DowntimeError::ConfigurationError(format!(
                "tier '{}' probability must lie in [0, 1], got {}",
                tier.category, tier.probability
            )));
        }
        if tier.duration_days == 0 {
            return Err(DowntimeError::ConfigurationError(format!(
                "tier '{}' must last at least one night",
                tier.category
            )));
        }
    }
    Ok(())
}

/// Where the sampler's seed comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedSource {
    /// Keep the sampler's current seed ([`DEFAULT_SEED`] unless changed).
    #[default]
    Default,
    /// Current UNIX time in whole seconds.
    WallClock,
    Explicit(u32),
}

/// Uniform doubles in `[0, 1)` from a single MT19937 stream.
struct UniformStream {
    mt: Mt19937GenRand32,
}

impl UniformStream {
    fn new(seed: u32) -> Self {
        Self {
            mt: Mt19937GenRand32::new(seed),
        }
    }

    fn next_f64(&mut self) -> f64 {
        let a = (self.mt.next_u32() >> 5) as f64;
        let b = (self.mt.next_u32() >> 6) as f64;
        (a * 67_108_864.0 + b) / 9_007_199_254_740_992.0
    }
}

/// Run the tiered decision process over `[0, survey_length)`.
pub fn sample_events(seed: u32, tiers: &[EventTier], survey_length: u32) -> Vec<DowntimeEvent> {
    let mut rng = UniformStream::new(seed);
    let mut events = Vec::new();
    let horizon = survey_length as u64;
    let mut night: u64 = 0;

    while night < horizon {
        let fired = tiers.iter().find(|tier| rng.next_f64() < tier.probability);
        match fired {
            Some(tier) => {
                events.push(DowntimeEvent::new(
                    night as u32,
                    tier.duration_days,
                    tier.category.clone(),
                ));
                night += tier.duration_days as u64 + 1;
            }
            None => night += 1,
        }
    }

    events
}

fn wall_clock_seconds() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Generator of unscheduled (random failure) downtime.
///
/// Created empty, populated once by [`initialize`](Self::initialize), then read
/// by scanning [`downtimes`](Self::downtimes) or by consuming with
/// [`pop_earliest`](Self::pop_earliest).
///
/// # Examples
///
/// ```
/// use downtime_model::algorithms::{SeedSource, UnscheduledDowntime};
///
/// let mut sampler = UnscheduledDowntime::new();
/// sampler.initialize(SeedSource::Explicit(1516231121), 7300).unwrap();
/// assert_eq!(sampler.len(), 133);
/// assert_eq!(sampler.total_downtime(), 315);
/// ```
#[derive(Debug, Clone)]
pub struct UnscheduledDowntime {
    seed: u32,
    tiers: Vec<EventTier>,
    survey_length: Option<u32>,
    schedule: DowntimeSchedule,
    clock: fn() -> i64,
}

impl Default for UnscheduledDowntime {
    fn default() -> Self {
        Self::new()
    }
}

impl UnscheduledDowntime {
    pub fn new() -> Self {
        Self {
            seed: DEFAULT_SEED,
            tiers: default_tiers(),
            survey_length: None,
            schedule: DowntimeSchedule::default(),
            clock: wall_clock_seconds,
        }
    }

    /// Replace the tier table. Tiers are checked in the given order.
    pub fn with_tiers(mut self, tiers: Vec<EventTier>) -> DowntimeResult<Self> {
        validate_tiers(&tiers)?;
        self.tiers = tiers;
        Ok(self)
    }

    /// Replace the wall clock used by [`SeedSource::WallClock`].
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn tiers(&self) -> &[EventTier] {
        &self.tiers
    }

    /// Horizon of the last initialization, if any.
    pub fn survey_length(&self) -> Option<u32> {
        self.survey_length
    }

    pub fn is_initialized(&self) -> bool {
        self.survey_length.is_some()
    }

    /// Draw the downtime events for a survey of `survey_length` nights.
    ///
    /// Fails with [`DowntimeError::AlreadyInitialized`] if called twice without
    /// an intervening [`reset`](Self::reset).
    pub fn initialize(&mut self, seed: SeedSource, survey_length: u32) -> DowntimeResult<()> {
        if self.is_initialized() {
            return Err(DowntimeError::AlreadyInitialized);
        }

        self.seed = match seed {
            SeedSource::Default => self.seed,
            SeedSource::Explicit(value) => value,
            SeedSource::WallClock => {
                let now = (self.clock)();
                u32::try_from(now).map_err(|_| {
                    DowntimeError::SeedError(format!(
                        "wall-clock time {} does not fit a 32-bit seed",
                        now
                    ))
                })?
            }
        };

        let events = sample_events(self.seed, &self.tiers, survey_length);
        self.schedule = DowntimeSchedule::new(events);
        self.survey_length = Some(survey_length);

        debug!(
            "Total unscheduled downtime: {} days in {} days.",
            self.total_downtime(),
            survey_length
        );
        Ok(())
    }

    /// Drop all events so the sampler can be initialized again. The seed is kept.
    pub fn reset(&mut self) {
        self.schedule = DowntimeSchedule::default();
        self.survey_length = None;
    }

    /// Remove and return the earliest remaining downtime, or `None` once exhausted.
    pub fn pop_earliest(&mut self) -> Option<DowntimeEvent> {
        self.schedule.pop_earliest()
    }

    pub fn len(&self) -> usize {
        self.schedule.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedule.is_empty()
    }

    /// Total remaining downtime in days.
    pub fn total_downtime(&self) -> u64 {
        self.schedule.total_downtime()
    }

    /// Remaining downtime events, earliest first.
    pub fn downtimes(&self) -> &[DowntimeEvent] {
        self.schedule.remaining()
    }

    pub fn schedule(&self) -> &DowntimeSchedule {
        &self.schedule
    }

    pub fn into_schedule(self) -> DowntimeSchedule {
        self.schedule
    }
}
