//! Nelder–Mead simplex minimiser with optional box constraints.
//!
//! Bounds are enforced by clipping every trial point into the box. Initial
//! vertices that overshoot an upper bound are first mirrored back inside.

use crate::bounds::Bound;
use crate::error::SolverResult;
use crate::minimize::{Minimizer, Minimum, check_problem};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use tracing::trace;

const REFLECTION: f64 = 1.0;
const EXPANSION: f64 = 2.0;
const CONTRACTION: f64 = 0.5;
const SHRINK: f64 = 0.5;

const NONZERO_DELTA: f64 = 0.05;
const ZERO_DELTA: f64 = 0.00025;

fn default_tol() -> f64 {
    1e-4
}

/// Nelder–Mead configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NelderMeadConfig {
    /// Maximum iterations (defaults to `200 * dim`)
    #[serde(default)]
    pub max_iterations: Option<usize>,
    /// Maximum cost evaluations (defaults to `200 * dim`)
    #[serde(default)]
    pub max_evaluations: Option<usize>,
    /// Absolute tolerance on the simplex diameter
    #[serde(default = "default_tol")]
    pub x_tol: f64,
    /// Absolute tolerance on the spread of cost values over the simplex
    #[serde(default = "default_tol")]
    pub f_tol: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            max_iterations: None,
            max_evaluations: None,
            x_tol: default_tol(),
            f_tol: default_tol(),
        }
    }
}

/// Bounded Nelder–Mead minimiser.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NelderMead {
    pub config: NelderMeadConfig,
}

impl NelderMead {
    pub fn new(config: NelderMeadConfig) -> Self {
        Self { config }
    }
}

impl Minimizer for NelderMead {
    fn minimize<F>(&self, cost: F, x0: &[f64], bounds: Option<&[Bound]>) -> SolverResult<Minimum>
    where
        F: Fn(&[f64]) -> f64,
    {
        check_problem(x0, bounds)?;
        let n = x0.len();
        let max_iterations = self.config.max_iterations.unwrap_or(200 * n);
        let max_evaluations = self.config.max_evaluations.unwrap_or(200 * n);

        let clip = |mut x: DVector<f64>| -> DVector<f64> {
            if let Some(bounds) = bounds {
                for (v, b) in x.iter_mut().zip(bounds) {
                    *v = b.clip(*v);
                }
            }
            x
        };

        let evaluations = Cell::new(0_usize);
        let eval = |x: &DVector<f64>| -> f64 {
            evaluations.set(evaluations.get() + 1);
            let c = cost(x.as_slice());
            if c.is_finite() { c } else { f64::INFINITY }
        };

        // Initial simplex
        let start = clip(DVector::from_column_slice(x0));
        let mut simplex = Vec::with_capacity(n + 1);
        simplex.push(start.clone());
        for k in 0..n {
            let mut vertex = start.clone();
            vertex[k] = if vertex[k] != 0.0 {
                (1.0 + NONZERO_DELTA) * vertex[k]
            } else {
                ZERO_DELTA
            };
            if let Some(bounds) = bounds {
                if vertex[k] > bounds[k].upper {
                    vertex[k] = 2.0 * bounds[k].upper - vertex[k];
                }
            }
            simplex.push(clip(vertex));
        }
        let mut values: Vec<f64> = simplex.iter().map(&eval).collect();
        sort_simplex(&mut simplex, &mut values);

        let mut iterations = 1;
        while evaluations.get() < max_evaluations && iterations < max_iterations {
            let diameter = simplex[1..]
                .iter()
                .map(|v| (v - &simplex[0]).amax())
                .fold(0.0, f64::max);
            let spread = values[1..]
                .iter()
                .map(|f| (f - values[0]).abs())
                .fold(0.0, f64::max);
            if diameter <= self.config.x_tol && spread <= self.config.f_tol {
                break;
            }

            let centroid = simplex[..n]
                .iter()
                .fold(DVector::<f64>::zeros(n), |acc, v| acc + v)
                / n as f64;
            let worst = simplex[n].clone();

            let reflected = clip(&centroid * (1.0 + REFLECTION) - &worst * REFLECTION);
            let f_reflected = eval(&reflected);

            let mut shrink = false;
            if f_reflected < values[0] {
                let expanded = clip(
                    &centroid * (1.0 + REFLECTION * EXPANSION) - &worst * (REFLECTION * EXPANSION),
                );
                let f_expanded = eval(&expanded);
                if f_expanded < f_reflected {
                    simplex[n] = expanded;
                    values[n] = f_expanded;
                } else {
                    simplex[n] = reflected;
                    values[n] = f_reflected;
                }
            } else if f_reflected < values[n - 1] {
                simplex[n] = reflected;
                values[n] = f_reflected;
            } else if f_reflected < values[n] {
                // Outside contraction
                let contracted = clip(
                    &centroid * (1.0 + CONTRACTION * REFLECTION)
                        - &worst * (CONTRACTION * REFLECTION),
                );
                let f_contracted = eval(&contracted);
                if f_contracted <= f_reflected {
                    simplex[n] = contracted;
                    values[n] = f_contracted;
                } else {
                    shrink = true;
                }
            } else {
                // Inside contraction
                let contracted = clip(&centroid * (1.0 - CONTRACTION) + &worst * CONTRACTION);
                let f_contracted = eval(&contracted);
                if f_contracted < values[n] {
                    simplex[n] = contracted;
                    values[n] = f_contracted;
                } else {
                    shrink = true;
                }
            }

            if shrink {
                let best = simplex[0].clone();
                for j in 1..=n {
                    simplex[j] = clip(&best + (&simplex[j] - &best) * SHRINK);
                    values[j] = eval(&simplex[j]);
                }
            }

            iterations += 1;
            sort_simplex(&mut simplex, &mut values);
        }

        let evaluations = evaluations.get();
        let converged = evaluations < max_evaluations && iterations < max_iterations;
        trace!(
            iterations,
            evaluations,
            cost = values[0],
            converged,
            "nelder-mead finished"
        );
        Ok(Minimum {
            x: simplex[0].as_slice().to_vec(),
            cost: values[0],
            iterations,
            evaluations,
            converged,
        })
    }
}

fn sort_simplex(simplex: &mut Vec<DVector<f64>>, values: &mut Vec<f64>) {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    *simplex = order.iter().map(|&i| simplex[i].clone()).collect();
    *values = order.iter().map(|&i| values[i]).collect();
}
