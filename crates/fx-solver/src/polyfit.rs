//! Least-squares polynomial fitting.

use crate::error::{SolverError, SolverResult};
use fx_core::ensure_all_finite;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Polynomial in ascending powers: `c[0] + c[1]·x + ... + c[d]·x^d`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// Create a polynomial from ascending-power coefficients.
    ///
    /// An empty coefficient list is the zero polynomial.
    pub fn new(coefficients: Vec<f64>) -> Self {
        if coefficients.is_empty() {
            return Self {
                coefficients: vec![0.0],
            };
        }
        Self { coefficients }
    }

    /// Create a polynomial from descending-power coefficients (highest power first).
    pub fn from_descending(mut coefficients: Vec<f64>) -> Self {
        coefficients.reverse();
        Self::new(coefficients)
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Coefficients with the highest power first.
    pub fn to_descending(&self) -> Vec<f64> {
        self.coefficients.iter().rev().copied().collect()
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Evaluate with Horner's scheme.
    pub fn eval(&self, x: f64) -> f64 {
        self.coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
    }

    pub fn eval_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.eval(x)).collect()
    }

    /// Least-squares fit of a polynomial of the given order to `(x, y)` points.
    ///
    /// Columns of the Vandermonde matrix are scaled to unit norm before the
    /// SVD solve, which keeps the problem well conditioned for inputs far from
    /// the origin.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the point sets differ in length or contain non-finite values
    /// - `RankDeficient` if there are fewer than `order + 1` distinct abscissae
    pub fn fit(x: &[f64], y: &[f64], order: usize) -> SolverResult<Self> {
        if x.len() != y.len() {
            return Err(SolverError::InvalidInput {
                what: format!("{} abscissae but {} ordinates", x.len(), y.len()),
            });
        }
        ensure_all_finite(x, "polyfit x")?;
        ensure_all_finite(y, "polyfit y")?;

        let n = x.len();
        let required = order + 1;
        if n < required {
            return Err(SolverError::RankDeficient { rank: n, required });
        }

        let mut vander = DMatrix::from_fn(n, required, |i, k| x[i].powi(k as i32));
        let mut scale = vec![1.0; required];
        for (k, s) in scale.iter_mut().enumerate() {
            let norm = vander.column(k).norm();
            if norm > 0.0 {
                *s = norm;
                let mut column = vander.column_mut(k);
                column /= norm;
            }
        }

        let svd = vander.svd(true, true);
        let largest = svd.singular_values.max();
        let cutoff = n as f64 * f64::EPSILON * largest;
        let rank = svd.rank(cutoff);
        if rank < required {
            return Err(SolverError::RankDeficient { rank, required });
        }

        let rhs = DVector::from_column_slice(y);
        let solution = svd
            .solve(&rhs, cutoff)
            .map_err(|e| SolverError::Numeric {
                what: format!("polynomial least-squares solve failed: {e}"),
            })?;

        let coefficients: Vec<f64> = solution
            .iter()
            .zip(&scale)
            .map(|(c, s)| c / s)
            .collect();
        ensure_all_finite(&coefficients, "polyfit coefficients")?;
        Ok(Self { coefficients })
    }
}
