//! Core data structures for temperature time series.

mod time_series;

pub use time_series::{hours_between, TimeSeries};
