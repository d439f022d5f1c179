//! Downtime status service.
//!
//! [`DowntimeModel`] answers whether the observatory is down at a given
//! instant from the scheduled and unscheduled interval sets carried in the
//! telemetry map.

pub mod downtime_model;


pub use downtime_model::{DowntimeModel, DowntimeStatus, TargetMap, Telemetry};
