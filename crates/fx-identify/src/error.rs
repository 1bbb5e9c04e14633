//! Error types for identification.

use fx_core::FxError;
use fx_signal::SignalError;
use fx_solver::SolverError;
use thiserror::Error;

/// Result type for identification operations.
pub type IdentifyResult<T> = Result<T, IdentifyError>;

/// Errors that can occur while identifying a model.
#[derive(Error, Debug)]
pub enum IdentifyError {
    /// Every trial of a stage failed to converge, so there is nothing to aggregate.
    #[error("Identification failed in {stage} stage: no successful fits out of {attempts} attempts")]
    NoSuccessfulFits { stage: &'static str, attempts: usize },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Signal error: {0}")]
    Signal(#[from] SignalError),

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("Core error: {0}")]
    Core(#[from] FxError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
