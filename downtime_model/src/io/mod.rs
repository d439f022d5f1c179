//! High-level data loading utilities.
//!
//! These loaders combine table parsing, unscheduled-downtime sampling and
//! night-to-calendar translation, producing ready-to-query interval sets.
//!
//! # Example
//!
//! ```no_run
//! use downtime_model::io::ScheduledDowntimeData;
//! use downtime_model::models::ModifiedJulianDate;
//!
//! let scheduled = ScheduledDowntimeData::new(ModifiedJulianDate::new(59853.0))
//!     .read_data()
//!     .expect("Failed to load");
//! println!("Loaded {} scheduled downtimes", scheduled.len());
//! ```

pub mod loaders;
pub mod sim_config;

#[cfg(test)]
mod loaders_tests;

pub use loaders::{
    DowntimeSource, ScheduledDowntime, ScheduledDowntimeData, UnscheduledDowntimeData,
    DEFAULT_SCHEDULED_DOWNTIME_TABLE,
};
pub use sim_config::{
    ScheduledSettings, SeedSetting, SimulationConfig, SurveySettings, UnscheduledSettings,
};
