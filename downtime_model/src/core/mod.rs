//! Core domain models for telescope downtime.
//!
//! This module defines the fundamental data structures used throughout the crate,
//! representing downtime events, their categories, and calendar intervals.

pub mod domain;

pub use domain::{DowntimeCategory, DowntimeEvent, DowntimeInterval};
