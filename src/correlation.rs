//! Cross-correlation of temperature against external event windows.
//!
//! Events (ship arrivals and departures) arrive as [start, end]
//! intervals; a binary presence signal is derived on the temperature
//! grid and correlated against the temperature sequence across a
//! symmetric range of hourly lags.

use crate::core::TimeSeries;
use crate::detection::Spike;
use crate::utils::stats::mean;
use chrono::{DateTime, Utc};

/// One external event window with an optional display label.
///
/// The label passes through untouched to reporting layers.
#[derive(Debug, Clone, PartialEq)]
pub struct EventInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub label: Option<String>,
}

impl EventInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end, label: None }
    }

    pub fn labeled(start: DateTime<Utc>, end: DateTime<Utc>, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: Some(label.into()),
        }
    }

    /// Intervals whose end precedes their start carry no usable
    /// window and are skipped everywhere.
    fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t <= self.end
    }

    fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start <= end && self.end >= start
    }
}

/// Result of correlating temperature against event presence.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossCorrelationResult {
    /// Signed lags in hours, ascending.
    pub lags_hours: Vec<f64>,
    /// Correlation per lag, normalized by its peak magnitude.
    pub correlation: Vec<f64>,
    /// Signed correlation value at the peak magnitude.
    pub peak_correlation: f64,
    /// Lag of the peak in hours. Positive means temperature changes
    /// lag event presence.
    pub peak_lag_hours: f64,
    /// Binary presence signal aligned with the temperature samples.
    pub presence: Vec<u8>,
    /// Fraction of samples with presence, 0 to 1.
    pub presence_fraction: f64,
}

/// Overlap between one detected spike and the supplied event windows.
#[derive(Debug, Clone, PartialEq)]
pub struct SpikeEventOverlap {
    /// Position of the spike in the input slice.
    pub spike_index: usize,
    pub spike_start: DateTime<Utc>,
    pub spike_end: DateTime<Utc>,
    /// Labels of every event window overlapping the spike's time
    /// span; empty when none do.
    pub event_labels: Vec<String>,
}

/// Correlate a temperature series against event presence.
///
/// Builds a 0/1 presence signal on the temperature timestamps (1
/// inside any valid interval), zero-means both signals, and computes
/// the linear cross-correlation over lags of ±min(max_lag_hours, n/2)
/// samples at the nominal one-sample-per-hour rate. The window is
/// normalized by its peak magnitude unless that peak is zero.
///
/// Returns `None` when no intervals are supplied or none overlap the
/// series' time range.
pub fn cross_correlate(
    series: &TimeSeries,
    intervals: &[EventInterval],
    max_lag_hours: usize,
) -> Option<CrossCorrelationResult> {
    if intervals.is_empty() || series.is_empty() {
        return None;
    }

    let n = series.len();
    let presence: Vec<u8> = series
        .timestamps()
        .iter()
        .map(|t| {
            let hit = intervals
                .iter()
                .any(|interval| interval.is_valid() && interval.contains(*t));
            u8::from(hit)
        })
        .collect();

    let present_count = presence.iter().filter(|&&p| p == 1).count();
    if present_count == 0 {
        return None;
    }

    let temps = series.values();
    let temp_mean = mean(temps);
    let presence_f: Vec<f64> = presence.iter().map(|&p| p as f64).collect();
    let presence_mean = mean(&presence_f);

    let temp_zm: Vec<f64> = temps.iter().map(|v| v - temp_mean).collect();
    let presence_zm: Vec<f64> = presence_f.iter().map(|v| v - presence_mean).collect();

    // Linear cross-correlation, computed directly on the lag window:
    // c[k] = sum_j temp[j + k] * presence[j].
    let max_lag = max_lag_hours.min(n / 2) as isize;
    let mut lags_hours = Vec::with_capacity((2 * max_lag + 1) as usize);
    let mut correlation = Vec::with_capacity((2 * max_lag + 1) as usize);
    for k in -max_lag..=max_lag {
        let mut sum = 0.0;
        for j in 0..n as isize {
            let shifted = j + k;
            if shifted >= 0 && shifted < n as isize {
                sum += temp_zm[shifted as usize] * presence_zm[j as usize];
            }
        }
        lags_hours.push(k as f64);
        correlation.push(sum);
    }

    let peak_magnitude = correlation.iter().fold(0.0_f64, |acc, c| acc.max(c.abs()));
    if peak_magnitude > 0.0 {
        for c in &mut correlation {
            *c /= peak_magnitude;
        }
    }

    // First-encountered peak on magnitude ties.
    let mut peak_idx = 0;
    let mut best = f64::NEG_INFINITY;
    for (idx, c) in correlation.iter().enumerate() {
        if c.abs() > best {
            best = c.abs();
            peak_idx = idx;
        }
    }

    Some(CrossCorrelationResult {
        peak_correlation: correlation[peak_idx],
        peak_lag_hours: lags_hours[peak_idx],
        lags_hours,
        correlation,
        presence,
        presence_fraction: present_count as f64 / n as f64,
    })
}

/// Relate detected spikes to event windows by time overlap.
///
/// Every spike gets a row; the labels list the event intervals whose
/// [start, end] window overlaps the spike's span. Unlabeled intervals
/// are reported by position.
pub fn relate_spikes_to_events(
    spikes: &[Spike],
    intervals: &[EventInterval],
) -> Vec<SpikeEventOverlap> {
    spikes
        .iter()
        .enumerate()
        .map(|(spike_index, spike)| {
            let event_labels = intervals
                .iter()
                .enumerate()
                .filter(|(_, interval)| {
                    interval.is_valid() && interval.overlaps(spike.start_time, spike.end_time)
                })
                .map(|(idx, interval)| {
                    interval
                        .label
                        .clone()
                        .unwrap_or_else(|| format!("event {}", idx + 1))
                })
                .collect();
            SpikeEventOverlap {
                spike_index,
                spike_start: spike.start_time,
                spike_end: spike.end_time,
                event_labels,
            }
        })
        .collect()
}
