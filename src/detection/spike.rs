//! Spike detection with nested (inner) spike resolution.
//!
//! A spike is a threshold-triggered excursion: the scan triggers when
//! the jump between two consecutive samples meets the configured
//! threshold, then extends forward until the signal retreats past a
//! cutoff derived from the value at the trigger point. Inner spikes
//! are found by re-running the same detector over an outer spike's own
//! sub-sequence, usually with a different threshold set.

use crate::core::hours_between;
use crate::error::{AnalysisError, Result};
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Direction of a temperature excursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Rapid warming.
    Up,
    /// Rapid cooling.
    Down,
}

impl FromStr for Direction {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            _ => Err(AnalysisError::InvalidDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Jump and relaxation thresholds for both directions, in °C.
///
/// `*_jump` is the minimum instantaneous delta that triggers a spike;
/// `*_relax` is how far back toward the base value the signal must
/// retreat for the spike to end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpikeThresholds {
    pub up_jump: f64,
    pub up_relax: f64,
    pub down_jump: f64,
    pub down_relax: f64,
}

impl Default for SpikeThresholds {
    fn default() -> Self {
        Self {
            up_jump: 0.5,
            up_relax: 0.2,
            down_jump: 0.5,
            down_relax: 0.2,
        }
    }
}

/// Handling of sampling gaps during a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapPolicy {
    /// Require consecutive samples to be 0.5-1.5x the expected
    /// interval apart, both at the trigger and at every extension
    /// step, and require spikes to span at least two points. A gap
    /// inside a spike ends it at the last continuous point.
    Strict,
    /// No continuity or minimum-length checks; a triggered spike is
    /// always recorded and may extend across gaps.
    Permissive,
}

/// Configuration for one detection pass.
///
/// Outer and inner passes take independent configs; there is no shared
/// default state between call sites.
#[derive(Debug, Clone, PartialEq)]
pub struct SpikeConfig {
    pub thresholds: SpikeThresholds,
    pub policy: GapPolicy,
    /// Expected sampling interval in hours (1.0 for hourly data).
    pub expected_interval_hours: f64,
}

impl Default for SpikeConfig {
    fn default() -> Self {
        Self::strict()
    }
}

impl SpikeConfig {
    /// Gap-aware preset: continuity window plus 2-point minimum length.
    pub fn strict() -> Self {
        Self {
            thresholds: SpikeThresholds::default(),
            policy: GapPolicy::Strict,
            expected_interval_hours: 1.0,
        }
    }

    /// Preset without gap or length checks. Downstream event
    /// correlation relies on this preset retaining short excursions.
    pub fn permissive() -> Self {
        Self {
            policy: GapPolicy::Permissive,
            ..Self::strict()
        }
    }

    /// Set the threshold table.
    pub fn with_thresholds(mut self, thresholds: SpikeThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Set the expected sampling interval in hours.
    pub fn with_expected_interval_hours(mut self, hours: f64) -> Self {
        self.expected_interval_hours = hours;
        self
    }

    fn validate(&self) -> Result<()> {
        let t = &self.thresholds;
        for (name, value) in [
            ("up_jump", t.up_jump),
            ("up_relax", t.up_relax),
            ("down_jump", t.down_jump),
            ("down_relax", t.down_relax),
            ("expected_interval_hours", self.expected_interval_hours),
        ] {
            if !(value > 0.0) || !value.is_finite() {
                return Err(AnalysisError::InvalidParameter(format!(
                    "{name} must be a positive finite number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Acceptable gap between consecutive samples, in hours.
    fn continuity_window(&self) -> (f64, f64) {
        (
            0.5 * self.expected_interval_hours,
            1.5 * self.expected_interval_hours,
        )
    }
}

/// A detected excursion. Immutable once detected.
#[derive(Debug, Clone, PartialEq)]
pub struct Spike {
    pub direction: Direction,
    /// Index of the point just before the triggering jump.
    pub start_idx: usize,
    /// Index of the point where the signal crossed the cutoff (or the
    /// last covered point if it never did).
    pub end_idx: usize,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Value at the excursion start.
    pub base_value: f64,
    /// Maximum over the full [start_idx, end_idx] window.
    pub max_value: f64,
    /// Minimum over the full [start_idx, end_idx] window.
    pub min_value: f64,
    /// The covered sub-sequence, timestamps and values in parallel.
    pub timestamps: Vec<DateTime<Utc>>,
    pub values: Vec<f64>,
}

impl Spike {
    /// Number of measurements covered, end_idx - start_idx + 1.
    pub fn point_count(&self) -> usize {
        self.values.len()
    }

    /// Excursion amplitude: max - base for Up, base - min for Down.
    pub fn amplitude(&self) -> f64 {
        match self.direction {
            Direction::Up => self.max_value - self.base_value,
            Direction::Down => self.base_value - self.min_value,
        }
    }
}

/// Inner spikes resolved within one outer spike.
#[derive(Debug, Clone, PartialEq)]
pub struct InnerSpikeSummary {
    spikes: Vec<Spike>,
    strongest: Option<usize>,
}

impl InnerSpikeSummary {
    /// Summarize a detection pass, locating the strongest spike by
    /// amplitude. Ties keep the earliest spike in scan order.
    pub fn from_spikes(spikes: Vec<Spike>) -> Self {
        let mut strongest = None;
        let mut best = f64::NEG_INFINITY;
        for (idx, spike) in spikes.iter().enumerate() {
            let amplitude = spike.amplitude();
            if amplitude > best {
                best = amplitude;
                strongest = Some(idx);
            }
        }
        Self { spikes, strongest }
    }

    pub fn spikes(&self) -> &[Spike] {
        &self.spikes
    }

    pub fn count(&self) -> usize {
        self.spikes.len()
    }

    /// The single highest-amplitude inner spike, if any exist.
    pub fn strongest(&self) -> Option<&Spike> {
        self.strongest.map(|idx| &self.spikes[idx])
    }

    /// Amplitude of the strongest inner spike, 0.0 when there is none.
    pub fn strongest_amplitude(&self) -> f64 {
        self.strongest().map(Spike::amplitude).unwrap_or(0.0)
    }
}

/// An outer spike composed with its resolved inner spikes.
#[derive(Debug, Clone, PartialEq)]
pub struct NestedSpike {
    pub spike: Spike,
    pub inner: InnerSpikeSummary,
}

/// Find spikes in a value sequence.
///
/// Scans forward once; on a trigger the spike is extended until the
/// signal retreats past `base ± relax`, and scanning resumes after the
/// spike so results never overlap. Sequences shorter than 2 points, or
/// sequences that never trigger, yield an empty list.
///
/// # Errors
/// `DimensionMismatch` when the slices differ in length,
/// `InvalidParameter` when a threshold or the expected interval is not
/// a positive finite number.
pub fn find_spikes(
    timestamps: &[DateTime<Utc>],
    values: &[f64],
    direction: Direction,
    config: &SpikeConfig,
) -> Result<Vec<Spike>> {
    if timestamps.len() != values.len() {
        return Err(AnalysisError::DimensionMismatch {
            expected: timestamps.len(),
            got: values.len(),
        });
    }
    config.validate()?;

    let n = values.len();
    let mut spikes = Vec::new();
    if n < 2 {
        return Ok(spikes);
    }

    let (jump, relax) = match direction {
        Direction::Up => (config.thresholds.up_jump, config.thresholds.up_relax),
        Direction::Down => (config.thresholds.down_jump, config.thresholds.down_relax),
    };
    let (gap_min, gap_max) = config.continuity_window();
    let continuous = |a: usize, b: usize| -> bool {
        let dt = hours_between(timestamps[a], timestamps[b]);
        (gap_min..=gap_max).contains(&dt)
    };

    let mut i = 0;
    while i < n - 1 {
        let delta = values[i + 1] - values[i];
        let triggered = match direction {
            Direction::Up => delta >= jump,
            Direction::Down => delta <= -jump,
        };
        let valid_step = match config.policy {
            GapPolicy::Strict => continuous(i, i + 1),
            GapPolicy::Permissive => true,
        };

        if !(triggered && valid_step) {
            i += 1;
            continue;
        }

        let start_idx = i;
        let base_value = values[start_idx];
        let cutoff = match direction {
            Direction::Up => base_value + relax,
            Direction::Down => base_value - relax,
        };

        let mut end_idx = start_idx + 1;
        while end_idx < n {
            if config.policy == GapPolicy::Strict && !continuous(end_idx - 1, end_idx) {
                // Gap inside the spike: end at the last continuous point.
                end_idx -= 1;
                break;
            }
            let relaxed = match direction {
                Direction::Up => values[end_idx] <= cutoff,
                Direction::Down => values[end_idx] >= cutoff,
            };
            if relaxed {
                break;
            }
            end_idx += 1;
        }
        if end_idx == n {
            end_idx = n - 1;
        }

        let long_enough = match config.policy {
            GapPolicy::Strict => end_idx > start_idx,
            GapPolicy::Permissive => true,
        };
        if long_enough {
            let window = &values[start_idx..=end_idx];
            let max_value = window.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let min_value = window.iter().cloned().fold(f64::INFINITY, f64::min);
            spikes.push(Spike {
                direction,
                start_idx,
                end_idx,
                start_time: timestamps[start_idx],
                end_time: timestamps[end_idx],
                base_value,
                max_value,
                min_value,
                timestamps: timestamps[start_idx..=end_idx].to_vec(),
                values: window.to_vec(),
            });
        }
        i = end_idx + 1;
    }

    Ok(spikes)
}

/// Resolve inner spikes for each outer spike.
///
/// Re-runs the detector over every outer spike's own sub-sequence with
/// the given (independent) configuration and composes the results.
/// The outer spikes themselves are returned unchanged inside the
/// composition.
pub fn resolve_inner_spikes(
    outer: Vec<Spike>,
    direction: Direction,
    config: &SpikeConfig,
) -> Result<Vec<NestedSpike>> {
    outer
        .into_iter()
        .map(|spike| {
            let inner = find_spikes(&spike.timestamps, &spike.values, direction, config)?;
            Ok(NestedSpike {
                inner: InnerSpikeSummary::from_spikes(inner),
                spike,
            })
        })
        .collect()
}

/// Count consecutive-sample jumps at or beyond the configured
/// thresholds: `(up_count, down_count)`.
///
/// A cheap pre-scan summary for reporting layers; it applies no
/// continuity checks.
pub fn count_jump_exceedances(values: &[f64], thresholds: &SpikeThresholds) -> (usize, usize) {
    let mut up = 0;
    let mut down = 0;
    for pair in values.windows(2) {
        let delta = pair[1] - pair[0];
        if delta >= thresholds.up_jump {
            up += 1;
        }
        if delta <= -thresholds.down_jump {
            down += 1;
        }
    }
    (up, down)
}
