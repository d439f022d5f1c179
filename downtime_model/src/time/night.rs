//! Translation between survey night indices and calendar time.

use crate::core::domain::{DowntimeEvent, DowntimeInterval};
use crate::models::ModifiedJulianDate;

/// Default offset from the survey start instant to the start of night 0, in days.
pub const DEFAULT_START_OF_NIGHT_OFFSET: f64 = -0.34;

/// Maps night indices onto calendar instants.
///
/// Night `n` starts at `night0 + n` days, where `night0` is the survey start
/// shifted by the start-of-night offset.
///
/// # Examples
///
/// ```
/// use downtime_model::models::ModifiedJulianDate;
/// use downtime_model::time::NightClock;
///
/// let clock = NightClock::new(ModifiedJulianDate::new(59853.0), 0.0);
/// assert_eq!(clock.night_start(158).value(), 60011.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NightClock {
    night0: ModifiedJulianDate,
}

impl NightClock {
    pub fn new(start_time: ModifiedJulianDate, start_of_night_offset: f64) -> Self {
        Self {
            night0: start_time.add_days(start_of_night_offset),
        }
    }

    /// Clock using [`DEFAULT_START_OF_NIGHT_OFFSET`].
    pub fn with_default_offset(start_time: ModifiedJulianDate) -> Self {
        Self::new(start_time, DEFAULT_START_OF_NIGHT_OFFSET)
    }

    /// Start of night 0.
    pub fn night0(&self) -> ModifiedJulianDate {
        self.night0
    }

    pub fn night_start(&self, night: u32) -> ModifiedJulianDate {
        self.night0.add_days(night as f64)
    }

    /// Calendar interval covered by a night-indexed event, labelled with its category.
    pub fn to_interval(&self, event: &DowntimeEvent) -> DowntimeInterval {
        let start = self.night_start(event.start_night);
        DowntimeInterval::new(
            start,
            start.add_days(event.duration_days as f64),
            event.category.label(),
        )
    }
}
