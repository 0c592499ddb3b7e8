//! Utility functions shared across analysis modules.

pub mod stats;

pub use stats::{autocorrelation, mean, moving_average, percentile, population_std};
