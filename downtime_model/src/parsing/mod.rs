//! Parsers for scheduled-downtime tables.
//!
//! A table is a list of `(night, duration, activity)` rows sorted by night.
//! Tables may be JSON documents or, with the `sqlite-source` feature, SQLite
//! databases holding a `Downtime` table.
//!
//! # Example
//!
//! ```no_run
//! use downtime_model::parsing::scheduled_parser::parse_scheduled_downtime_file;
//! use std::path::Path;
//!
//! let events = parse_scheduled_downtime_file(Path::new("scheduled_downtime.json"))
//!     .expect("Failed to parse downtime table");
//! ```

pub mod scheduled_parser;


#[cfg(feature = "sqlite-source")]
pub use scheduled_parser::parse_scheduled_downtime_db;
pub use scheduled_parser::{parse_scheduled_downtime_file, parse_scheduled_downtime_str};
