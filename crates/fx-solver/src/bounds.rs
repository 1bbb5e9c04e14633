//! Per-dimension box constraints.

use crate::error::{SolverError, SolverResult};
use serde::{Deserialize, Serialize};

/// Closed interval `[lower, upper]` for one optimisation variable.
///
/// Either side may be infinite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    pub lower: f64,
    pub upper: f64,
}

impl Bound {
    /// # Errors
    ///
    /// Returns error if either side is NaN or `lower > upper`.
    pub fn new(lower: f64, upper: f64) -> SolverResult<Self> {
        let bound = Self { lower, upper };
        bound.validate()?;
        Ok(bound)
    }

    pub fn unbounded() -> Self {
        Self {
            lower: f64::NEG_INFINITY,
            upper: f64::INFINITY,
        }
    }

    pub fn validate(&self) -> SolverResult<()> {
        if self.lower.is_nan() || self.upper.is_nan() || self.lower > self.upper {
            return Err(SolverError::InvalidInput {
                what: format!("invalid bound [{}, {}]", self.lower, self.upper),
            });
        }
        Ok(())
    }

    pub fn clip(&self, v: f64) -> f64 {
        v.clamp(self.lower, self.upper)
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.lower && v <= self.upper
    }

    pub fn is_finite(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite()
    }
}
