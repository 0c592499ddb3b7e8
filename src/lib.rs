//! # seatherm
//!
//! Exploratory analysis of multi-sensor sea temperature time series.
//!
//! Provides spike detection with nested (inner) spike resolution,
//! FFT-based filtering (diurnal cycle and seasonal component removal),
//! thermal stratification between location pairs, and cross-correlation
//! of temperature against external event windows such as ship
//! arrivals and departures.
//!
//! The crate is a pure computation library: spreadsheet ingestion,
//! persistence, plotting, and workflow orchestration live in external
//! layers that feed [`core::TimeSeries`] values in and consume the
//! result structures returned here.

pub mod core;
pub mod correlation;
pub mod detection;
pub mod error;
pub mod filtering;
pub mod stratification;
pub mod utils;

pub use error::{AnalysisError, Result};

pub mod prelude {
    pub use crate::core::TimeSeries;
    pub use crate::correlation::{cross_correlate, CrossCorrelationResult, EventInterval};
    pub use crate::detection::{
        find_spikes, resolve_inner_spikes, Direction, GapPolicy, NestedSpike, Spike, SpikeConfig,
        SpikeThresholds,
    };
    pub use crate::error::{AnalysisError, Result};
    pub use crate::filtering::{apply_filter, FilterMode, SeasonalConfig};
    pub use crate::stratification::{compute_stratification, StratificationResult};
}
