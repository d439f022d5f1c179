//! # Downtime Model
//!
//! Scheduled and unscheduled telescope downtime for survey simulations.
//!
//! The crate answers three questions for any instant of a simulated survey:
//! is the telescope down right now, when does the current downtime end, and
//! when does the next scheduled downtime begin.
//!
//! ## Architecture
//!
//! - [`core`]: downtime events, categories and calendar intervals
//! - [`models`]: time representation, configuration and provenance
//! - [`time`]: night-index to calendar translation and time parsing
//! - [`algorithms`]: the unscheduled-downtime sampler, event queues and interval sets
//! - [`parsing`]: scheduled-downtime table readers (JSON, SQLite)
//! - [`io`]: high-level loaders producing ready-to-query interval sets
//! - [`services`]: the downtime status engine
//!
//! ## Example
//!
//! ```no_run
//! use downtime_model::io::{ScheduledDowntimeData, UnscheduledDowntimeData};
//! use downtime_model::models::ModifiedJulianDate;
//! use downtime_model::services::{DowntimeModel, Telemetry, TargetMap};
//!
//! let start = ModifiedJulianDate::new(59853.0);
//! let scheduled = ScheduledDowntimeData::new(start).read_data().unwrap();
//! let unscheduled = UnscheduledDowntimeData::new(start).make_data().unwrap();
//!
//! let model = DowntimeModel::new(None).unwrap();
//! let mut efd = Telemetry::new();
//! efd.insert("scheduled_downtimes".to_string(), scheduled);
//! efd.insert("unscheduled_downtimes".to_string(), unscheduled);
//! let mut target = TargetMap::new();
//! target.insert("time".to_string(), ModifiedJulianDate::new(60000.0));
//!
//! let status = model.status(&efd, &target).unwrap();
//! println!("down: {} until {:?}", status.status, status.end);
//! ```

pub mod algorithms;
pub mod core;
pub mod error;
pub mod io;
pub mod models;
pub mod parsing;
pub mod services;
pub mod time;

pub use error::{DowntimeError, DowntimeResult};
