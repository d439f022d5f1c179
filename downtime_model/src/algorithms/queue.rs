//! Night-indexed downtime queue with destructive and non-destructive access.

use serde::Serialize;

use crate::core::domain::DowntimeEvent;

/// An ordered list of downtime events consumed front to back.
///
/// The events themselves are never modified after construction. A cursor marks
/// how many have been popped; [`len`](Self::len), [`total_downtime`](Self::total_downtime)
/// and [`remaining`](Self::remaining) all refer to the events not yet popped.
///
/// # Examples
///
/// ```
/// use downtime_model::algorithms::DowntimeSchedule;
/// use downtime_model::core::domain::{DowntimeCategory, DowntimeEvent};
///
/// let mut schedule = DowntimeSchedule::new(vec![
///     DowntimeEvent::new(29, 1, DowntimeCategory::Minor),
///     DowntimeEvent::new(40, 3, DowntimeCategory::Intermediate),
/// ]);
/// assert_eq!(schedule.total_downtime(), 4);
///
/// assert_eq!(schedule.pop_earliest().unwrap().start_night, 29);
/// assert_eq!(schedule.len(), 1);
/// assert_eq!(schedule.all().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DowntimeSchedule {
    events: Vec<DowntimeEvent>,
    #[serde(skip)]
    cursor: usize,
}

impl DowntimeSchedule {
    pub fn new(events: Vec<DowntimeEvent>) -> Self {
        Self { events, cursor: 0 }
    }

    /// Remove and return the earliest remaining event, or `None` once exhausted.
    pub fn pop_earliest(&mut self) -> Option<DowntimeEvent> {
        let event = self.events.get(self.cursor)?.clone();
        self.cursor += 1;
        Some(event)
    }

    /// Earliest remaining event without consuming it.
    pub fn peek(&self) -> Option<&DowntimeEvent> {
        self.events.get(self.cursor)
    }

    /// Events not yet popped.
    pub fn remaining(&self) -> &[DowntimeEvent] {
        &self.events[self.cursor..]
    }

    /// Every event, popped or not.
    pub fn all(&self) -> &[DowntimeEvent] {
        &self.events
    }

    pub fn iter(&self) -> impl Iterator<Item = &DowntimeEvent> {
        self.remaining().iter()
    }

    pub fn len(&self) -> usize {
        self.events.len() - self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of the durations of the remaining events, in days.
    pub fn total_downtime(&self) -> u64 {
        self.iter().map(|e| e.duration_days as u64).sum()
    }

    /// Put every popped event back in the queue.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }
}
