//! Property-based tests for the unscheduled-downtime sampler.

use downtime_model::algorithms::{default_tiers, sample_events, SeedSource, UnscheduledDowntime};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_same_seed_same_events(seed in any::<u32>(), horizon in 1u32..3000) {
        let tiers = default_tiers();
        prop_assert_eq!(
            sample_events(seed, &tiers, horizon),
            sample_events(seed, &tiers, horizon)
        );
    }

    #[test]
    fn prop_events_separated_by_rest_day(seed in any::<u32>(), horizon in 1u32..3000) {
        let events = sample_events(seed, &default_tiers(), horizon);
        for pair in events.windows(2) {
            prop_assert!(pair[1].start_night >= pair[0].start_night + pair[0].duration_days + 1);
        }
    }

    #[test]
    fn prop_events_start_within_horizon(seed in any::<u32>(), horizon in 1u32..3000) {
        for event in sample_events(seed, &default_tiers(), horizon) {
            prop_assert!(event.start_night < horizon);
            prop_assert!(event.duration_days >= 1);
            prop_assert!(event.category.is_unscheduled_tier());
        }
    }

    #[test]
    fn prop_popped_durations_sum_to_total(seed in any::<u32>(), horizon in 1u32..3000) {
        let mut sampler = UnscheduledDowntime::new();
        sampler.initialize(SeedSource::Explicit(seed), horizon).unwrap();
        let total = sampler.total_downtime();

        let mut popped = 0u64;
        let mut previous: Option<u32> = None;
        while let Some(event) = sampler.pop_earliest() {
            if let Some(prev) = previous {
                prop_assert!(event.start_night > prev);
            }
            previous = Some(event.start_night);
            popped += u64::from(event.duration_days);
        }
        prop_assert_eq!(popped, total);
        prop_assert!(sampler.is_empty());
    }
}
