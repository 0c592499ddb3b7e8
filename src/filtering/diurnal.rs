//! Removal of the 24-hour diurnal temperature cycle.

use super::fft::{fft_forward, fft_frequencies, ifft_real};
use crate::core::TimeSeries;
use rustfft::num_complex::Complex64;

/// Cycles per hour of the diurnal component.
const DIURNAL_FREQUENCY: f64 = 1.0 / 24.0;

/// Result of diurnal cycle removal.
///
/// Both sequences have the input's length and satisfy
/// `detrended + component == input` up to floating-point round-off.
#[derive(Debug, Clone, PartialEq)]
pub struct DiurnalFilter {
    /// Input with the diurnal component subtracted.
    pub detrended: Vec<f64>,
    /// The extracted 24-hour component.
    pub component: Vec<f64>,
}

/// Extract and remove the 24-hour cycle from a temperature series.
///
/// The sampling interval is derived from the series span; the spectrum
/// bin closest to 1/24 cycles per hour and its conjugate mirror form
/// the component, everything else is left untouched. Series shorter
/// than 2 points pass through with a zero component.
pub fn remove_diurnal_cycle(series: &TimeSeries) -> DiurnalFilter {
    let values = series.values();
    let n = values.len();

    let Some(dt) = series.sampling_interval_hours().filter(|dt| *dt > 0.0) else {
        return DiurnalFilter {
            detrended: values.to_vec(),
            component: vec![0.0; n],
        };
    };

    let spectrum = fft_forward(values);
    let frequencies = fft_frequencies(n, dt);

    // Closest bin to the diurnal frequency; first bin wins ties.
    let mut closest = 0;
    let mut best = f64::INFINITY;
    for (k, freq) in frequencies.iter().enumerate() {
        let distance = (freq - DIURNAL_FREQUENCY).abs();
        if distance < best {
            best = distance;
            closest = k;
        }
    }

    let mut component_spectrum = vec![Complex64::new(0.0, 0.0); n];
    component_spectrum[closest] = spectrum[closest];
    if closest != 0 {
        // Mirror bin keeps the inverse transform real-valued.
        component_spectrum[n - closest] = spectrum[n - closest];
    }

    let component = ifft_real(&component_spectrum);
    let detrended = values
        .iter()
        .zip(&component)
        .map(|(value, comp)| value - comp)
        .collect();

    DiurnalFilter { detrended, component }
}
