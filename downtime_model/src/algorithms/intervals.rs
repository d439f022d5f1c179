//! Ordered, non-overlapping downtime intervals with sorted-search queries.

use serde::Serialize;

use crate::algorithms::queue::DowntimeSchedule;
use crate::core::domain::DowntimeInterval;
use crate::error::{DowntimeError, DowntimeResult};
use crate::models::ModifiedJulianDate;
use crate::time::NightClock;

/// Calendar-time downtime intervals, sorted by start and pairwise disjoint.
///
/// Because the intervals do not overlap, their ends are sorted too, which lets
/// "is `t` inside a downtime" be answered with two binary searches: if more
/// intervals have started by `t` than have ended by `t`, exactly one is open.
///
/// Intervals may touch (`start[i + 1] == end[i]`); an instant on the shared
/// boundary belongs to the later interval.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IntervalSet {
    intervals: Vec<DowntimeInterval>,
}

impl IntervalSet {
    /// Build a set, checking the ordering and positivity invariants.
    pub fn new(intervals: Vec<DowntimeInterval>) -> DowntimeResult<Self> {
        for (i, interval) in intervals.iter().enumerate() {
            if !(interval.end > interval.start) {
                return Err(DowntimeError::InvalidInterval(format!(
                    "interval {} ('{}') ends at MJD {} which is not after its start {}",
                    i,
                    interval.label,
                    interval.end.value(),
                    interval.start.value()
                )));
            }
        }
        for (i, pair) in intervals.windows(2).enumerate() {
            if !(pair[1].start > pair[0].start) {
                return Err(DowntimeError::InvalidInterval(format!(
                    "interval {} does not start after interval {}",
                    i + 1,
                    i
                )));
            }
            if pair[1].start < pair[0].end {
                return Err(DowntimeError::InvalidInterval(format!(
                    "interval {} ('{}') overlaps interval {} ('{}')",
                    i + 1,
                    pair[1].label,
                    i,
                    pair[0].label
                )));
            }
        }
        Ok(Self { intervals })
    }

    /// Translate night-indexed events into calendar intervals.
    ///
    /// Every event in the schedule is used, including ones already popped.
    pub fn from_events(schedule: &DowntimeSchedule, clock: &NightClock) -> DowntimeResult<Self> {
        Self::new(schedule.all().iter().map(|e| clock.to_interval(e)).collect())
    }

    /// Number of intervals starting at or before `t`.
    ///
    /// This is the right-biased insertion point of `t` into the start times.
    pub fn index_of_next_start(&self, t: ModifiedJulianDate) -> usize {
        self.intervals.partition_point(|iv| iv.start <= t)
    }

    /// Number of intervals ending at or before `t`.
    pub fn index_of_next_end(&self, t: ModifiedJulianDate) -> usize {
        self.intervals.partition_point(|iv| iv.end <= t)
    }

    /// The interval containing `t`, if any.
    pub fn current_at(&self, t: ModifiedJulianDate) -> Option<&DowntimeInterval> {
        let next_start = self.index_of_next_start(t);
        let next_end = self.index_of_next_end(t);
        if next_start > next_end {
            self.intervals.get(next_end)
        } else {
            None
        }
    }

    /// The first interval starting strictly after `t`.
    pub fn next_starting_after(&self, t: ModifiedJulianDate) -> Option<&DowntimeInterval> {
        self.intervals.get(self.index_of_next_start(t))
    }

    pub fn get(&self, index: usize) -> Option<&DowntimeInterval> {
        self.intervals.get(index)
    }

    pub fn first(&self) -> Option<&DowntimeInterval> {
        self.intervals.first()
    }

    pub fn last(&self) -> Option<&DowntimeInterval> {
        self.intervals.last()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DowntimeInterval> {
        self.intervals.iter()
    }

    pub fn as_slice(&self) -> &[DowntimeInterval] {
        &self.intervals
    }

    /// Total downtime in days.
    pub fn total_days(&self) -> f64 {
        self.intervals.iter().map(|iv| iv.duration_days()).sum()
    }
}

impl<'a> IntoIterator for &'a IntervalSet {
    type Item = &'a DowntimeInterval;
    type IntoIter = std::slice::Iter<'a, DowntimeInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::{DowntimeCategory, DowntimeEvent};

    fn mjd(v: f64) -> ModifiedJulianDate {
        ModifiedJulianDate::new(v)
    }

    fn sample_set() -> IntervalSet {
        IntervalSet::new(vec![
            DowntimeInterval::new(mjd(10.0), mjd(17.0), "general maintenance"),
            DowntimeInterval::new(mjd(30.0), mjd(31.0), "minor event"),
            DowntimeInterval::new(mjd(31.0), mjd(34.0), "intermediate event"),
            DowntimeInterval::new(mjd(50.0), mjd(64.0), "recoat mirror"),
        ])
        .unwrap()
    }

    #[test]
    fn test_search_indices_are_right_biased() {
        let set = sample_set();
        assert_eq!(set.index_of_next_start(mjd(9.0)), 0);
        assert_eq!(set.index_of_next_start(mjd(10.0)), 1);
        assert_eq!(set.index_of_next_end(mjd(16.9)), 0);
        assert_eq!(set.index_of_next_end(mjd(17.0)), 1);
        assert_eq!(set.index_of_next_start(mjd(100.0)), 4);
        assert_eq!(set.index_of_next_end(mjd(100.0)), 4);
    }

    #[test]
    fn test_current_inside_interval() {
        let set = sample_set();
        let current = set.current_at(mjd(12.5)).unwrap();
        assert_eq!(current.label, "general maintenance");

        let current = set.current_at(mjd(55.0)).unwrap();
        assert_eq!(current.label, "recoat mirror");
    }

    #[test]
    fn test_boundaries() {
        let set = sample_set();
        assert_eq!(set.current_at(mjd(10.0)).unwrap().start, mjd(10.0));
        assert!(set.current_at(mjd(17.0)).is_none());
        // Touching intervals: the shared instant belongs to the later one.
        assert_eq!(set.current_at(mjd(31.0)).unwrap().label, "intermediate event");
    }

    #[test]
    fn test_outside_all_intervals() {
        let set = sample_set();
        assert!(set.current_at(mjd(0.0)).is_none());
        assert!(set.current_at(mjd(20.0)).is_none());
        assert!(set.current_at(mjd(1000.0)).is_none());
    }

    #[test]
    fn test_next_starting_after() {
        let set = sample_set();
        assert_eq!(set.next_starting_after(mjd(0.0)).unwrap().start, mjd(10.0));
        assert_eq!(set.next_starting_after(mjd(12.0)).unwrap().start, mjd(30.0));
        assert_eq!(set.next_starting_after(mjd(30.0)).unwrap().start, mjd(31.0));
        assert!(set.next_starting_after(mjd(50.0)).is_none());
    }

    #[test]
    fn test_empty_set() {
        let set = IntervalSet::default();
        assert!(set.current_at(mjd(1.0)).is_none());
        assert!(set.next_starting_after(mjd(1.0)).is_none());
        assert_eq!(set.total_days(), 0.0);
    }

    #[test]
    fn test_rejects_non_positive_interval() {
        let err = IntervalSet::new(vec![DowntimeInterval::new(mjd(5.0), mjd(5.0), "zero")]).unwrap_err();
        assert!(matches!(err, DowntimeError::InvalidInterval(_)));
    }

    #[test]
    fn test_rejects_unsorted_or_overlapping() {
        let unsorted = vec![
            DowntimeInterval::new(mjd(20.0), mjd(21.0), "b"),
            DowntimeInterval::new(mjd(10.0), mjd(11.0), "a"),
        ];
        assert!(IntervalSet::new(unsorted).is_err());

        let overlapping = vec![
            DowntimeInterval::new(mjd(10.0), mjd(15.0), "a"),
            DowntimeInterval::new(mjd(14.0), mjd(16.0), "b"),
        ];
        assert!(IntervalSet::new(overlapping).is_err());
    }

    #[test]
    fn test_from_events_translates_with_clock() {
        let schedule = DowntimeSchedule::new(vec![
            DowntimeEvent::new(0, 1, DowntimeCategory::Minor),
            DowntimeEvent::new(2, 7, DowntimeCategory::Major),
        ]);
        let clock = NightClock::new(mjd(60000.0), 0.0);
        let set = IntervalSet::from_events(&schedule, &clock).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.get(1).unwrap().start, mjd(60002.0));
        assert_eq!(set.get(1).unwrap().end, mjd(60009.0));
        assert_eq!(set.get(1).unwrap().label, "major event");
        assert_eq!(set.total_days(), 8.0);
    }
}
