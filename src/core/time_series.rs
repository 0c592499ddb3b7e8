//! TimeSeries data structure for per-location temperature records.

use crate::error::{AnalysisError, Result};
use chrono::{DateTime, Utc};

/// A univariate temperature time series.
///
/// Holds parallel vectors of timestamps and measured values (°C).
/// Timestamps must be monotonically non-decreasing; duplicates are
/// allowed because tolerance-rounded alignment can collapse close
/// timestamps onto the same instant.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Create a new series, validating shape and timestamp order.
    pub fn new(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(AnalysisError::DimensionMismatch {
                expected: timestamps.len(),
                got: values.len(),
            });
        }
        for pair in timestamps.windows(2) {
            if pair[1] < pair[0] {
                return Err(AnalysisError::TimestampError(
                    "timestamps must be non-decreasing".to_string(),
                ));
            }
        }
        Ok(Self { timestamps, values })
    }

    /// Get the number of observations.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Get timestamps.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Get values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Total time span in hours (0 for fewer than 2 points).
    pub fn span_hours(&self) -> f64 {
        match (self.timestamps.first(), self.timestamps.last()) {
            (Some(first), Some(last)) => hours_between(*first, *last),
            _ => 0.0,
        }
    }

    /// Average sampling interval in hours, span / (n - 1).
    ///
    /// Returns `None` for fewer than 2 points.
    pub fn sampling_interval_hours(&self) -> Option<f64> {
        if self.len() < 2 {
            return None;
        }
        Some(self.span_hours() / (self.len() - 1) as f64)
    }

    /// Build a new series over the same timestamps with replaced values.
    pub fn with_values(&self, values: Vec<f64>) -> Result<Self> {
        Self::new(self.timestamps.clone(), values)
    }
}

/// Signed elapsed time from `a` to `b` in hours.
pub fn hours_between(a: DateTime<Utc>, b: DateTime<Utc>) -> f64 {
    (b - a).num_milliseconds() as f64 / 3_600_000.0
}
