//! Error types for solver operations.

use fx_core::FxError;
use thiserror::Error;

/// Errors that can occur while fitting or minimising.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Invalid input: {what}")]
    InvalidInput { what: String },

    #[error("Rank-deficient fit: rank {rank}, need {required}")]
    RankDeficient { rank: usize, required: usize },

    #[error("Numeric error: {what}")]
    Numeric { what: String },

    #[error("Core error: {0}")]
    Core(#[from] FxError),
}

pub type SolverResult<T> = Result<T, SolverError>;
