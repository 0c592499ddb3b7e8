//! Discrete Fourier transform helpers for spectral filtering.
//!
//! Thin wrappers over rustfft that keep the full complex spectrum so
//! single bins can be masked and the remainder inverse-transformed.

use rustfft::{num_complex::Complex64, FftPlanner};

/// Forward DFT of a real-valued signal.
///
/// Returns the full complex spectrum (all n bins, unnormalized), so
/// conjugate-symmetric mirror bins stay addressable for masking.
pub fn fft_forward(signal: &[f64]) -> Vec<Complex64> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }

    let mut buffer: Vec<Complex64> = signal.iter().map(|&x| Complex64::new(x, 0.0)).collect();
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buffer);
    buffer
}

/// Inverse DFT, returning the real part of the normalized result.
///
/// The imaginary residue of a conjugate-symmetric spectrum is
/// round-off noise and is discarded.
pub fn ifft_real(spectrum: &[Complex64]) -> Vec<f64> {
    let n = spectrum.len();
    if n == 0 {
        return Vec::new();
    }

    let mut buffer = spectrum.to_vec();
    let mut planner = FftPlanner::new();
    let ifft = planner.plan_fft_inverse(n);
    ifft.process(&mut buffer);

    let scale = 1.0 / n as f64;
    buffer.iter().map(|c| c.re * scale).collect()
}

/// Bin frequencies for an n-point transform with sample spacing `d`.
///
/// Layout matches the standard DFT convention: non-negative
/// frequencies k/(n·d) in the lower half, negative frequencies in the
/// upper half. With `d` in hours the unit is cycles per hour.
pub fn fft_frequencies(n: usize, d: f64) -> Vec<f64> {
    let denom = n as f64 * d;
    (0..n)
        .map(|k| {
            let k = if k <= (n - 1) / 2 {
                k as f64
            } else {
                k as f64 - n as f64
            };
            k / denom
        })
        .collect()
}

/// Magnitudes of a complex spectrum.
pub fn magnitudes(spectrum: &[Complex64]) -> Vec<f64> {
    spectrum.iter().map(|c| c.norm()).collect()
}
