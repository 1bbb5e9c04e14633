//! Fast-mode identification: the damped second-order part of the response.
//!
//! Over the fast window after a switch, the output is modelled as
//!
//! ```text
//! phase        = atan2(-ω, -α) - π/2
//! transient(t) = cos(ω t + phase) · exp(-α t)
//! a            = sqrt(α² + ω²) / ω
//! y(t)         = y_initial + k · (1 + a · transient(t)) · Δv
//! ```
//!
//! where `Δv = f(u_final) - f(u_initial)` is the step referred through the
//! static nonlinearity. `transient(0) = -1/a`, so the prediction starts at
//! `y_initial` and settles at `y_initial + k·Δv`.

use crate::error::{IdentifyError, IdentifyResult};
use crate::fit::{fit_trials, median_columns, steady_change};
use crate::restart::RestartStrategy;
use fx_core::mean_abs_deviation;
use fx_signal::StepResponse;
use fx_solver::{Bound, Minimizer, Polynomial};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use tracing::info;

/// Fast-mode parameters `(k, α, ω)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FastParams {
    /// Gain `k`
    pub gain: f64,
    /// Damping rate `α` (1/s)
    pub damping: f64,
    /// Angular frequency `ω` (rad/s)
    pub omega: f64,
}

impl FastParams {
    pub fn new(gain: f64, damping: f64, omega: f64) -> Self {
        Self {
            gain,
            damping,
            omega,
        }
    }

    pub fn to_vec(&self) -> Vec<f64> {
        vec![self.gain, self.damping, self.omega]
    }

    /// Build from a `[gain, damping, omega]` slice, `None` unless it has exactly three elements.
    pub(crate) fn from_slice(x: &[f64]) -> Option<Self> {
        match *x {
            [gain, damping, omega] => Some(Self::new(gain, damping, omega)),
            _ => None,
        }
    }

    /// Undamped natural frequency `sqrt(α² + ω²)`.
    pub fn natural_frequency(&self) -> f64 {
        self.damping.hypot(self.omega)
    }

    /// Damping ratio `α / sqrt(α² + ω²)`.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / self.natural_frequency()
    }
}

impl Default for FastParams {
    fn default() -> Self {
        Self::new(0.5, 10.0, 10.0)
    }
}

/// Box constraints for the fast-mode fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FastBounds {
    pub gain: Bound,
    pub damping: Bound,
    pub omega: Bound,
}

impl FastBounds {
    pub fn as_array(&self) -> [Bound; 3] {
        [self.gain, self.damping, self.omega]
    }

    pub fn contains(&self, params: &FastParams) -> bool {
        self.gain.contains(params.gain)
            && self.damping.contains(params.damping)
            && self.omega.contains(params.omega)
    }

    /// Bounds must be finite (random restarts sample from them) and ordered.
    pub fn validate(&self) -> IdentifyResult<()> {
        for (name, bound) in [
            ("gain", self.gain),
            ("damping", self.damping),
            ("omega", self.omega),
        ] {
            bound.validate()?;
            if !bound.is_finite() {
                return Err(IdentifyError::InvalidArg {
                    what: format!("{name} bound must be finite"),
                });
            }
        }
        Ok(())
    }
}

impl Default for FastBounds {
    fn default() -> Self {
        Self {
            gain: Bound {
                lower: 0.0,
                upper: 1.0,
            },
            damping: Bound {
                lower: 1.0e-3,
                upper: 1.0e3,
            },
            omega: Bound {
                lower: 1.0e-3,
                upper: 1.0e3,
            },
        }
    }
}

/// Starting point and bounds for the fast-mode fit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FastOptions {
    pub initial: FastParams,
    pub bounds: FastBounds,
}

/// Normalised fast response `k · (1 + a · transient(t))`.
pub fn fast_response(t: f64, params: &FastParams) -> f64 {
    let FastParams {
        gain,
        damping: alpha,
        omega,
    } = *params;
    let phase = (-omega).atan2(-alpha) - FRAC_PI_2;
    let transient = (omega * t + phase).cos() * (-alpha * t).exp();
    let a = alpha.hypot(omega) / omega;
    gain * (1.0 + a * transient)
}

/// Model output over the fast window of `step`.
pub fn predict_fast_output(
    step: &StepResponse,
    static_model: &Polynomial,
    params: &FastParams,
) -> Vec<f64> {
    let dv = steady_change(step, static_model);
    let y0 = step.output_initial();
    step.fast_view()
        .time()
        .iter()
        .map(|&t| y0 + fast_response(t, params) * dv)
        .collect()
}

/// Mean absolute deviation over the fast window, `None` if the window is empty
/// or `x` is not a three-parameter vector.
fn fast_cost(step: &StepResponse, static_model: &Polynomial, x: &[f64]) -> Option<f64> {
    let params = FastParams::from_slice(x)?;
    let y_model = predict_fast_output(step, static_model, &params);
    mean_abs_deviation(&y_model, step.fast_view().output())
}

/// Identify `(k, α, ω)` from a set of step responses.
///
/// The restart strategy plans which responses are fitted from which start
/// points. Every converged trial contributes its parameters, and the result is
/// the per-parameter median over all of them.
///
/// # Errors
///
/// - `InvalidArg` if the options are malformed
/// - `NoSuccessfulFits` if no trial converged
pub fn identify_fast<M>(
    steps: &[StepResponse],
    static_model: &Polynomial,
    options: &FastOptions,
    strategy: &mut dyn RestartStrategy,
    minimizer: &M,
) -> IdentifyResult<FastParams>
where
    M: Minimizer + Sync,
{
    options.bounds.validate()?;
    let trials: Vec<(usize, Vec<f64>)> = strategy
        .plan(steps.len(), &options.initial, &options.bounds)
        .into_iter()
        .map(|trial| (trial.step, trial.initial.to_vec()))
        .collect();

    let bounds = options.bounds.as_array();
    let successes = fit_trials(
        "fast",
        steps,
        &trials,
        Some(bounds.as_slice()),
        minimizer,
        |step, x| fast_cost(step, static_model, x),
    )?;
    let [gain, damping, omega] = median_columns("fast", trials.len(), &successes)?;
    let params = FastParams::new(gain, damping, omega);

    info!(
        trials = trials.len(),
        successes = successes.len(),
        gain = params.gain,
        damping = params.damping,
        omega = params.omega,
        "fast mode identified"
    );
    Ok(params)
}
