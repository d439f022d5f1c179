//! Downtime generation and query algorithms.
//!
//! # Components
//!
//! - [`unscheduled`]: seeded sampler of random-failure downtime
//! - [`queue`]: night-indexed event queue with pop and scan access
//! - [`intervals`]: calendar-time interval sets with binary-search queries

pub mod intervals;
pub mod queue;
pub mod unscheduled;

pub use intervals::IntervalSet;
pub use queue::DowntimeSchedule;
pub use unscheduled::{
    default_tiers, sample_events, EventTier, SeedSource, UnscheduledDowntime, DEFAULT_SEED,
    DEFAULT_SURVEY_LENGTH,
};
