//! Error types for recording and segmentation operations.

use fx_core::FxError;
use thiserror::Error;

/// Result type for signal operations.
pub type SignalResult<T> = Result<T, SignalError>;

/// Errors raised while validating or segmenting a recording.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SignalError {
    /// Invalid argument provided to a signal function.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    /// A sequence has no samples.
    #[error("Empty signal: {what}")]
    Empty { what: &'static str },

    /// Sequences that must be time-aligned differ in length.
    #[error("Length mismatch: {what} has {len} samples, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        len: usize,
        expected: usize,
    },

    /// Time does not increase strictly.
    #[error("Time is not strictly increasing at sample {index} ({previous} -> {current})")]
    NonIncreasingTime {
        index: usize,
        previous: f64,
        current: f64,
    },

    /// An averaging window collapsed to zero samples.
    #[error("Empty {window} window in step response {sequence_id}")]
    EmptyWindow {
        window: &'static str,
        sequence_id: usize,
    },

    #[error(transparent)]
    Core(#[from] FxError),
}
