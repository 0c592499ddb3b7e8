//! Removal of dominant ("seasonal") spectral components.

use super::fft::{fft_forward, ifft_real, magnitudes};
use crate::utils::stats::{moving_average, percentile};
use rustfft::num_complex::Complex64;

/// Configuration for seasonal component removal.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalConfig {
    /// Magnitude percentile above which a bin counts as seasonal.
    pub percentile_threshold: f64,
    /// Optional centered moving-average window applied to the
    /// magnitude spectrum before thresholding. Only used when the
    /// signal is longer than the window.
    pub smooth_window: Option<usize>,
}

impl Default for SeasonalConfig {
    fn default() -> Self {
        Self {
            percentile_threshold: 90.0,
            smooth_window: None,
        }
    }
}

impl SeasonalConfig {
    /// Set the percentile threshold (0 to 100).
    pub fn with_percentile(mut self, percentile: f64) -> Self {
        self.percentile_threshold = percentile.clamp(0.0, 100.0);
        self
    }

    /// Smooth the magnitude spectrum with the given window before
    /// thresholding.
    pub fn with_smoothing(mut self, window: usize) -> Self {
        self.smooth_window = Some(window);
        self
    }
}

/// Result of seasonal component removal.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalFilter {
    /// Input with the dominant components removed.
    pub deseasonalized: Vec<f64>,
    /// Magnitude zeroed at each frequency bin, 0 where the bin was
    /// kept. Same length as the input.
    pub removed_magnitude: Vec<f64>,
}

/// Remove high-magnitude frequency components from a value sequence.
///
/// Bins whose (optionally smoothed) spectral magnitude is strictly
/// above the configured percentile of that spectrum are zeroed; the
/// remainder is inverse-transformed. The kept and removed components
/// together reconstruct the input up to floating-point round-off.
pub fn remove_seasonality(values: &[f64], config: &SeasonalConfig) -> SeasonalFilter {
    let n = values.len();
    if n < 2 {
        return SeasonalFilter {
            deseasonalized: values.to_vec(),
            removed_magnitude: vec![0.0; n],
        };
    }

    let spectrum = fft_forward(values);
    let magnitude = magnitudes(&spectrum);

    let scored = match config.smooth_window {
        Some(window) if n > window => moving_average(&magnitude, window),
        _ => magnitude.clone(),
    };
    let threshold = percentile(&scored, config.percentile_threshold);

    let mut filtered: Vec<Complex64> = spectrum;
    let mut removed_magnitude = vec![0.0; n];
    for k in 0..n {
        if scored[k] > threshold {
            removed_magnitude[k] = magnitude[k];
            filtered[k] = Complex64::new(0.0, 0.0);
        }
    }

    SeasonalFilter {
        deseasonalized: ifft_real(&filtered),
        removed_magnitude,
    }
}
