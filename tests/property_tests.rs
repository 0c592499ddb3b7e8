//! Property-based tests for the analysis invariants.
//!
//! These verify invariants that should hold for all valid inputs,
//! using randomly generated hourly temperature series.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use seatherm::correlation::{cross_correlate, EventInterval};
use seatherm::detection::{
    find_spikes, resolve_inner_spikes, Direction, GapPolicy, SpikeConfig, SpikeThresholds,
};
use seatherm::filtering::{apply_filter, remove_diurnal_cycle, FilterMode, SeasonalConfig};
use seatherm::prelude::TimeSeries;
use seatherm::stratification::compute_stratification;

fn hourly_timestamps(n: usize) -> Vec<DateTime<Utc>> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..n).map(|i| base + Duration::hours(i as i64)).collect()
}

fn make_series(values: &[f64]) -> TimeSeries {
    TimeSeries::new(hourly_timestamps(values.len()), values.to_vec()).unwrap()
}

/// Plausible sea temperatures in °C.
fn temperature_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-2.0..32.0_f64, min_len..max_len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn spikes_contain_their_window(
        values in temperature_strategy(2, 60),
        up in prop::bool::ANY,
        strict in prop::bool::ANY,
    ) {
        let direction = if up { Direction::Up } else { Direction::Down };
        let config = if strict { SpikeConfig::strict() } else { SpikeConfig::permissive() };
        let timestamps = hourly_timestamps(values.len());

        let spikes = find_spikes(&timestamps, &values, direction, &config).unwrap();
        for spike in &spikes {
            prop_assert_eq!(spike.base_value, values[spike.start_idx]);
            prop_assert!(spike.end_idx >= spike.start_idx);
            prop_assert!(spike.end_idx < values.len());
            prop_assert_eq!(spike.point_count(), spike.end_idx - spike.start_idx + 1);
            for k in spike.start_idx..=spike.end_idx {
                prop_assert!(values[k] >= spike.min_value);
                prop_assert!(values[k] <= spike.max_value);
            }
            prop_assert!(spike.amplitude() >= 0.0);
            if config.policy == GapPolicy::Strict {
                prop_assert!(spike.end_idx > spike.start_idx);
            }
        }
    }

    #[test]
    fn spikes_never_overlap(
        values in temperature_strategy(2, 60),
        up in prop::bool::ANY,
    ) {
        let direction = if up { Direction::Up } else { Direction::Down };
        let timestamps = hourly_timestamps(values.len());
        let spikes =
            find_spikes(&timestamps, &values, direction, &SpikeConfig::strict()).unwrap();

        for pair in spikes.windows(2) {
            prop_assert!(pair[0].end_idx < pair[1].start_idx);
        }
    }

    #[test]
    fn strongest_inner_spike_dominates(
        values in temperature_strategy(2, 60),
    ) {
        let timestamps = hourly_timestamps(values.len());
        let tight = SpikeConfig::strict().with_thresholds(SpikeThresholds {
            up_jump: 0.4,
            up_relax: 0.1,
            ..SpikeThresholds::default()
        });
        let outer = find_spikes(&timestamps, &values, Direction::Up, &tight).unwrap();
        let nested = resolve_inner_spikes(outer, Direction::Up, &SpikeConfig::strict()).unwrap();

        for item in &nested {
            let strongest = item.inner.strongest_amplitude();
            for inner in item.inner.spikes() {
                prop_assert!(inner.amplitude() <= strongest);
            }
            if item.inner.count() == 0 {
                prop_assert_eq!(strongest, 0.0);
            }
        }
    }

    #[test]
    fn diurnal_removal_round_trips(
        values in temperature_strategy(2, 100),
    ) {
        let series = make_series(&values);
        let result = remove_diurnal_cycle(&series);

        prop_assert_eq!(result.detrended.len(), values.len());
        for i in 0..values.len() {
            let reconstructed = result.detrended[i] + result.component[i];
            prop_assert!((reconstructed - values[i]).abs() < 1e-6);
        }
    }

    #[test]
    fn none_filter_is_identity(
        values in temperature_strategy(0, 40),
    ) {
        let series = make_series(&values);
        let filtered = apply_filter(&series, FilterMode::None, &SeasonalConfig::default());
        prop_assert_eq!(filtered.values(), series.values());
        prop_assert_eq!(filtered.timestamps(), series.timestamps());
    }

    #[test]
    fn stratification_is_antisymmetric(
        pair in temperature_strategy(1, 50).prop_flat_map(|a| {
            let len = a.len();
            (Just(a), prop::collection::vec(-2.0..32.0_f64, len))
        }),
    ) {
        let (a_values, b_values) = pair;
        let a = make_series(&a_values);
        let b = make_series(&b_values);

        let ab = compute_stratification("a", &a, "b", &b).unwrap();
        let ba = compute_stratification("b", &b, "a", &a).unwrap();

        prop_assert!((ab.mean_diff + ba.mean_diff).abs() < 1e-9);
        prop_assert!((ab.max_diff + ba.min_diff).abs() < 1e-9);
        prop_assert_eq!(ab.loc1_warmer_count, ba.loc2_warmer_count);
        prop_assert_eq!(ab.loc2_warmer_count, ba.loc1_warmer_count);
        prop_assert_eq!(ab.common_points, ba.common_points);
    }

    #[test]
    fn correlation_peak_is_normalized(
        values in temperature_strategy(4, 60),
        start in 0usize..20,
        span in 0usize..10,
    ) {
        let series = make_series(&values);
        let base = series.timestamps()[0];
        let interval = EventInterval::new(
            base + Duration::hours(start as i64),
            base + Duration::hours((start + span) as i64),
        );

        if let Some(result) = cross_correlate(&series, &[interval], 24) {
            prop_assert_eq!(result.lags_hours.len(), result.correlation.len());
            for c in &result.correlation {
                prop_assert!(c.abs() <= 1.0 + 1e-9);
            }
            prop_assert!(result.peak_correlation.abs() <= 1.0 + 1e-9);
            prop_assert!(result.presence_fraction > 0.0);
            prop_assert!(result.presence_fraction <= 1.0);
        }
    }
}
