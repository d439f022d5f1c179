//! Domain models for telescope downtime.
//!
//! Downtime exists in two shapes: night-indexed [`DowntimeEvent`]s, as produced by
//! the unscheduled sampler or read from a maintenance table, and calendar-time
//! [`DowntimeInterval`]s, which are what the status engine queries.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::ModifiedJulianDate;

/// Kind of downtime attached to an event or interval.
///
/// Unscheduled failures fall into one of four severity tiers. Scheduled
/// maintenance carries the free-text activity from its source table.
///
/// Serializes as its label, so `"major event"` round-trips to [`DowntimeCategory::Major`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum DowntimeCategory {
    Minor,
    Intermediate,
    Major,
    Catastrophic,
    Custom(String),
}

impl DowntimeCategory {
    /// Human-readable label used in reports and interval labels.
    ///
    /// # Examples
    ///
    /// ```
    /// use downtime_model::core::domain::DowntimeCategory;
    ///
    /// assert_eq!(DowntimeCategory::Minor.label(), "minor event");
    /// assert_eq!(DowntimeCategory::Custom("recoat mirror".into()).label(), "recoat mirror");
    /// ```
    pub fn label(&self) -> &str {
        match self {
            DowntimeCategory::Minor => "minor event",
            DowntimeCategory::Intermediate => "intermediate event",
            DowntimeCategory::Major => "major event",
            DowntimeCategory::Catastrophic => "catastrophic event",
            DowntimeCategory::Custom(activity) => activity,
        }
    }

    /// Returns `true` for the four built-in failure tiers.
    pub fn is_unscheduled_tier(&self) -> bool {
        !matches!(self, DowntimeCategory::Custom(_))
    }
}

impl fmt::Display for DowntimeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for DowntimeCategory {
    fn from(label: String) -> Self {
        match label.as_str() {
            "minor event" => DowntimeCategory::Minor,
            "intermediate event" => DowntimeCategory::Intermediate,
            "major event" => DowntimeCategory::Major,
            "catastrophic event" => DowntimeCategory::Catastrophic,
            _ => DowntimeCategory::Custom(label),
        }
    }
}

impl From<&str> for DowntimeCategory {
    fn from(label: &str) -> Self {
        DowntimeCategory::from(label.to_string())
    }
}

impl From<DowntimeCategory> for String {
    fn from(category: DowntimeCategory) -> Self {
        match category {
            DowntimeCategory::Custom(activity) => activity,
            other => other.label().to_string(),
        }
    }
}

/// A downtime expressed in survey nights.
///
/// `start_night` is the day offset from the start of the survey and
/// `duration_days` the number of nights lost (always positive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DowntimeEvent {
    pub start_night: u32,
    pub duration_days: u32,
    pub category: DowntimeCategory,
}

impl DowntimeEvent {
    /// Creates a new downtime event.
    ///
    /// # Examples
    ///
    /// ```
    /// use downtime_model::core::domain::{DowntimeCategory, DowntimeEvent};
    ///
    /// let event = DowntimeEvent::new(48, 3, DowntimeCategory::Intermediate);
    /// assert_eq!(event.end_night(), Some(51));
    /// ```
    pub fn new(start_night: u32, duration_days: u32, category: DowntimeCategory) -> Self {
        Self {
            start_night,
            duration_days,
            category,
        }
    }

    /// First night after the downtime, `None` if it does not fit a night index.
    pub fn end_night(&self) -> Option<u32> {
        self.start_night.checked_add(self.duration_days)
    }
}

/// A downtime expressed in calendar time.
///
/// The interval is half-open: the telescope is down from `start` (inclusive)
/// until `end` (exclusive).
///
/// # Examples
///
/// ```
/// use downtime_model::core::domain::DowntimeInterval;
/// use downtime_model::models::ModifiedJulianDate;
///
/// let interval = DowntimeInterval::new(
///     ModifiedJulianDate::new(59000.0),
///     ModifiedJulianDate::new(59007.0),
///     "general maintenance",
/// );
/// assert_eq!(interval.duration_days(), 7.0);
/// assert!(interval.contains(ModifiedJulianDate::new(59000.0)));
/// assert!(!interval.contains(ModifiedJulianDate::new(59007.0)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DowntimeInterval {
    pub start: ModifiedJulianDate,
    pub end: ModifiedJulianDate,
    pub label: String,
}

impl DowntimeInterval {
    pub fn new(start: ModifiedJulianDate, end: ModifiedJulianDate, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }

    /// Length of the interval in days.
    pub fn duration_days(&self) -> f64 {
        self.end.value() - self.start.value()
    }

    /// Returns `true` if `t` falls inside `[start, end)`.
    pub fn contains(&self, t: ModifiedJulianDate) -> bool {
        self.start <= t && t < self.end
    }
}
