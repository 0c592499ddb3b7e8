//! Frequency-domain filtering of temperature sequences.
//!
//! Pre-processing used before spike detection and event correlation:
//! removal of the 24-hour diurnal cycle, removal of dominant
//! "seasonal" spectral components, and the magnitude spectrum itself
//! for downstream plotting layers.

pub mod fft;

mod diurnal;
mod seasonal;

pub use diurnal::{remove_diurnal_cycle, DiurnalFilter};
pub use seasonal::{remove_seasonality, SeasonalConfig, SeasonalFilter};

use crate::core::TimeSeries;
use crate::error::{AnalysisError, Result};
use std::str::FromStr;

/// Which periodic components to remove before analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Pass the series through untouched.
    #[default]
    None,
    /// Remove the 24-hour cycle.
    Diurnal,
    /// Remove dominant spectral components.
    Seasonal,
    /// Remove the 24-hour cycle first, then dominant components from
    /// the detrended result.
    Both,
}

impl FromStr for FilterMode {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(FilterMode::None),
            "diurnal" => Ok(FilterMode::Diurnal),
            "seasonal" => Ok(FilterMode::Seasonal),
            "both" => Ok(FilterMode::Both),
            _ => Err(AnalysisError::InvalidParameter(format!(
                "unknown filter mode {s:?} (expected none, diurnal, seasonal, or both)"
            ))),
        }
    }
}

/// Magnitude spectrum of a series, for inspection and plotting.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// Bin frequencies in cycles per hour.
    pub frequencies: Vec<f64>,
    /// Bin magnitudes.
    pub magnitude: Vec<f64>,
}

/// Compute the magnitude spectrum of a temperature series.
///
/// Frequencies use the series' mean sampling interval; a series too
/// short to derive one falls back to unit (per-sample) spacing.
pub fn spectrum(series: &TimeSeries) -> Spectrum {
    let dt = series
        .sampling_interval_hours()
        .filter(|dt| *dt > 0.0)
        .unwrap_or(1.0);
    let transformed = fft::fft_forward(series.values());
    Spectrum {
        frequencies: fft::fft_frequencies(series.len(), dt),
        magnitude: fft::magnitudes(&transformed),
    }
}

/// Apply the selected filter to a series, keeping its timestamps.
///
/// `FilterMode::None` returns an exact copy. `Both` applies diurnal
/// removal first and seasonal removal to the detrended values; the
/// order is significant because the percentile threshold adapts to
/// whatever spectrum it sees.
pub fn apply_filter(series: &TimeSeries, mode: FilterMode, config: &SeasonalConfig) -> TimeSeries {
    let filtered = match mode {
        FilterMode::None => return series.clone(),
        FilterMode::Diurnal => remove_diurnal_cycle(series).detrended,
        FilterMode::Seasonal => remove_seasonality(series.values(), config).deseasonalized,
        FilterMode::Both => {
            let detrended = remove_diurnal_cycle(series).detrended;
            remove_seasonality(&detrended, config).deseasonalized
        }
    };
    // Length is preserved by every filter, so this cannot fail.
    series
        .with_values(filtered)
        .unwrap_or_else(|_| series.clone())
}
