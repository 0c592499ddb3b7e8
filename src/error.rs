//! Error types for the seatherm library.

use thiserror::Error;

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors that can occur during analysis operations.
///
/// These cover caller mistakes only. Inputs that are merely too short
/// or too misaligned to analyze are normal outcomes and are reported
/// as empty spike lists or absent (`None`) results, never as errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Direction string is neither "up" nor "down".
    #[error("invalid direction: {0:?} (expected \"up\" or \"down\")")]
    InvalidDirection(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Length mismatch between parallel inputs.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Timestamp-related error.
    #[error("timestamp error: {0}")]
    TimestampError(String),
}
