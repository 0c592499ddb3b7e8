//! Thermal stratification between two measurement locations.
//!
//! Aligns two independently-sampled series on common timestamps and
//! computes the pointwise and aggregate temperature differential.

use crate::core::TimeSeries;
use crate::utils::stats::{mean, population_std};
use chrono::{DateTime, Duration, DurationRound, Utc};
use std::collections::BTreeMap;

/// Aligned temperature differential between two locations.
#[derive(Debug, Clone, PartialEq)]
pub struct StratificationResult {
    pub location1: String,
    pub location2: String,
    /// Common timestamps in ascending order.
    pub timestamps: Vec<DateTime<Utc>>,
    /// Per-timestamp difference, location1 - location2.
    pub differences: Vec<f64>,
    pub mean_diff: f64,
    pub max_diff: f64,
    pub min_diff: f64,
    /// Population standard deviation of the differences.
    pub std_diff: f64,
    /// Points where location1 was strictly warmer.
    pub loc1_warmer_count: usize,
    /// Points where location2 was strictly warmer.
    pub loc2_warmer_count: usize,
    pub common_points: usize,
    /// Points dropped from either side due to misalignment.
    pub skipped_count: usize,
}

/// Compute the temperature differential between two locations.
///
/// Matching is by exact timestamp first. Only when no exact match
/// exists are both series re-keyed on minute-rounded timestamps and
/// intersected again; exact matches are never widened by rounding.
/// Returns `None` when either series is empty or no overlap exists
/// even after rounding.
pub fn compute_stratification(
    name1: &str,
    series1: &TimeSeries,
    name2: &str,
    series2: &TimeSeries,
) -> Option<StratificationResult> {
    if series1.is_empty() || series2.is_empty() {
        return None;
    }

    let exact1 = index_by_timestamp(series1, false);
    let exact2 = index_by_timestamp(series2, false);
    let mut common = intersect_keys(&exact1, &exact2);

    let (map1, map2) = if common.is_empty() {
        let rounded1 = index_by_timestamp(series1, true);
        let rounded2 = index_by_timestamp(series2, true);
        common = intersect_keys(&rounded1, &rounded2);
        if common.is_empty() {
            return None;
        }
        (rounded1, rounded2)
    } else {
        (exact1, exact2)
    };

    let differences: Vec<f64> = common.iter().map(|t| map1[t] - map2[t]).collect();
    let common_points = common.len();
    let loc1_warmer_count = differences.iter().filter(|d| **d > 0.0).count();
    let loc2_warmer_count = differences.iter().filter(|d| **d < 0.0).count();
    let skipped_count = series1.len() + series2.len() - 2 * common_points;

    Some(StratificationResult {
        location1: name1.to_string(),
        location2: name2.to_string(),
        mean_diff: mean(&differences),
        max_diff: differences.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        min_diff: differences.iter().cloned().fold(f64::INFINITY, f64::min),
        std_diff: population_std(&differences),
        loc1_warmer_count,
        loc2_warmer_count,
        common_points,
        skipped_count,
        timestamps: common,
        differences,
    })
}

/// Key a series by timestamp, optionally rounded to the nearest
/// minute. The first value wins when rounding collapses timestamps.
fn index_by_timestamp(series: &TimeSeries, round: bool) -> BTreeMap<DateTime<Utc>, f64> {
    let mut map = BTreeMap::new();
    for (t, v) in series.timestamps().iter().zip(series.values()) {
        let key = if round {
            t.duration_round(Duration::minutes(1)).unwrap_or(*t)
        } else {
            *t
        };
        map.entry(key).or_insert(*v);
    }
    map
}

fn intersect_keys(
    a: &BTreeMap<DateTime<Utc>, f64>,
    b: &BTreeMap<DateTime<Utc>, f64>,
) -> Vec<DateTime<Utc>> {
    a.keys().filter(|k| b.contains_key(*k)).cloned().collect()
}
