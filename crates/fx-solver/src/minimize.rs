//! The minimisation capability used by the identifiers.

use crate::bounds::Bound;
use crate::error::{SolverError, SolverResult};

/// Outcome of one minimisation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Minimum {
    /// Best point found
    pub x: Vec<f64>,
    /// Cost at `x`
    pub cost: f64,
    /// Number of iterations
    pub iterations: usize,
    /// Number of cost evaluations
    pub evaluations: usize,
    /// Converged flag. `false` means an iteration or evaluation limit was hit.
    pub converged: bool,
}

/// Minimise a scalar cost over a fixed-dimension real vector.
///
/// Implementations must be pure with respect to their inputs: the same cost,
/// start point and bounds give the same [`Minimum`]. Failing to converge is
/// reported through [`Minimum::converged`], not as an error.
pub trait Minimizer {
    /// # Errors
    ///
    /// Returns error only for malformed problems (empty `x0`, bounds of the
    /// wrong dimension, inverted bounds).
    fn minimize<F>(&self, cost: F, x0: &[f64], bounds: Option<&[Bound]>) -> SolverResult<Minimum>
    where
        F: Fn(&[f64]) -> f64;
}

/// Validate the shape of a minimisation problem.
pub fn check_problem(x0: &[f64], bounds: Option<&[Bound]>) -> SolverResult<()> {
    if x0.is_empty() {
        return Err(SolverError::InvalidInput {
            what: "empty initial guess".to_string(),
        });
    }
    if let Some(&bad) = x0.iter().find(|v| !v.is_finite()) {
        return Err(SolverError::InvalidInput {
            what: format!("non-finite initial guess component {bad}"),
        });
    }
    if let Some(bounds) = bounds {
        if bounds.len() != x0.len() {
            return Err(SolverError::InvalidInput {
                what: format!(
                    "{} bounds given for a {}-dimensional problem",
                    bounds.len(),
                    x0.len()
                ),
            });
        }
        for bound in bounds {
            bound.validate()?;
        }
    }
    Ok(())
}
