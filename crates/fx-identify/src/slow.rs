//! Slow-mode identification: the first-order lead/lag after a switch.
//!
//! With the fast gain `k` held fixed and `z0 = s0 / k`, the output over the
//! whole response after the switch is modelled as
//!
//! ```text
//! slow(t) = z0/s0 - ((z0 - s0)/s0) · exp(-s0 t)
//! y(t)    = y_initial + k · slow(t) · Δv
//! ```
//!
//! `slow(0) = 1` and `slow(∞) = 1/k`, so the prediction jumps to
//! `y_initial + k·Δv` and creeps towards `y_initial + Δv`.

use crate::error::{IdentifyError, IdentifyResult};
use crate::fit::{fit_trials, median_columns, steady_change};
use fx_core::{ensure_finite, mean_abs_deviation};
use fx_signal::StepResponse;
use fx_solver::{Minimizer, Polynomial};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Slow-mode pole and zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlowParams {
    /// Pole `s0` (1/s)
    pub pole: f64,
    /// Zero `z0 = s0 / k` (1/s)
    pub zero: f64,
}

impl SlowParams {
    /// Slow parameters consistent with unit overall DC gain for `fast_gain`.
    pub fn from_pole(pole: f64, fast_gain: f64) -> Self {
        Self {
            pole,
            zero: pole / fast_gain,
        }
    }
}

/// Normalised slow response `slow(t)`.
pub fn slow_response(t: f64, pole: f64, zero: f64) -> f64 {
    zero / pole - ((zero - pole) / pole) * (-pole * t).exp()
}

/// Model output over the after-switch window of `step`.
pub fn predict_slow_output(
    step: &StepResponse,
    params: &SlowParams,
    static_model: &Polynomial,
    fast_gain: f64,
) -> Vec<f64> {
    let dv = steady_change(step, static_model);
    let y0 = step.output_initial();
    step.after_view()
        .time()
        .iter()
        .map(|&t| y0 + fast_gain * slow_response(t, params.pole, params.zero) * dv)
        .collect()
}

fn slow_cost(
    step: &StepResponse,
    static_model: &Polynomial,
    fast_gain: f64,
    x: &[f64],
) -> Option<f64> {
    let &[pole] = x else {
        return None;
    };
    let params = SlowParams::from_pole(pole, fast_gain);
    let y_model = predict_slow_output(step, &params, static_model, fast_gain);
    mean_abs_deviation(&y_model, step.after_view().output())
}

/// Identify the slow pole (and derived zero) with the fast gain held fixed.
///
/// Each response is fitted once from `pole_initial` without bounds; the pole
/// is the median over the converged fits.
///
/// # Errors
///
/// - `InvalidArg` if `fast_gain` is zero or non-finite
/// - `Core` if `pole_initial` is non-finite
/// - `NoSuccessfulFits` if no fit converged
pub fn identify_slow<M>(
    steps: &[StepResponse],
    static_model: &Polynomial,
    fast_gain: f64,
    pole_initial: f64,
    minimizer: &M,
) -> IdentifyResult<SlowParams>
where
    M: Minimizer + Sync,
{
    if !fast_gain.is_finite() || fast_gain == 0.0 {
        return Err(IdentifyError::InvalidArg {
            what: format!("fast gain must be finite and non-zero, got {fast_gain}"),
        });
    }
    let pole_initial = ensure_finite(pole_initial, "initial pole")?;

    let trials: Vec<(usize, Vec<f64>)> = (0..steps.len()).map(|i| (i, vec![pole_initial])).collect();
    let successes = fit_trials("slow", steps, &trials, None, minimizer, |step, x| {
        slow_cost(step, static_model, fast_gain, x)
    })?;
    let [pole] = median_columns("slow", trials.len(), &successes)?;
    let params = SlowParams::from_pole(pole, fast_gain);

    info!(
        trials = trials.len(),
        successes = successes.len(),
        pole = params.pole,
        zero = params.zero,
        "slow mode identified"
    );
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fx_core::FxError;
    use fx_signal::SteadyLevels;
    use fx_solver::{NelderMead, NelderMeadConfig};

    const GAIN: f64 = 0.7;

    fn synthetic_step(pole: f64, sequence_id: usize) -> StepResponse {
        let dt = 0.01;
        let (y0, dv) = (0.5, 1.5);
        let params = SlowParams::from_pole(pole, GAIN);
        let time: Vec<f64> = (-10..1000).map(|i| i as f64 * dt).collect();
        let output = time
            .iter()
            .map(|&t| {
                if t < 0.0 {
                    y0
                } else {
                    y0 + GAIN * slow_response(t, params.pole, params.zero) * dv
                }
            })
            .collect();
        let input = time.iter().map(|&t| if t < 0.0 { 0.0 } else { 1.5 }).collect();
        let levels = SteadyLevels {
            input_initial: 0.0,
            input_final: 1.5,
            output_initial: y0,
            output_final: y0 + dv,
        };
        StepResponse::new(time, input, output, levels, 10, 30, sequence_id).unwrap()
    }

    #[test]
    fn response_boundaries() {
        let params = SlowParams::from_pole(1.0, GAIN);
        assert!((slow_response(0.0, params.pole, params.zero) - 1.0).abs() < 1e-12);
        assert!((slow_response(50.0, params.pole, params.zero) - 1.0 / GAIN).abs() < 1e-12);
    }

    #[test]
    fn prediction_jumps_by_fast_gain_then_settles() {
        let step = synthetic_step(1.0, 0);
        let model = Polynomial::new(vec![0.0, 1.0]);
        let params = SlowParams::from_pole(1.0, GAIN);
        let y = predict_slow_output(&step, &params, &model, GAIN);
        assert_eq!(y.len(), 1000);
        assert!((y[0] - (0.5 + GAIN * 1.5)).abs() < 1e-12);
        assert!((y[999] - 2.0).abs() < 1e-3);
    }

    #[test]
    fn recovers_pole_from_default_guess() {
        let steps: Vec<_> = (0..3).map(|k| synthetic_step(1.0, k)).collect();
        let model = Polynomial::new(vec![0.0, 1.0]);
        let fitted = identify_slow(&steps, &model, GAIN, 0.2, &NelderMead::default()).unwrap();
        assert!((fitted.pole - 1.0).abs() < 1e-2, "pole {}", fitted.pole);
        assert!((fitted.zero - fitted.pole / GAIN).abs() < 1e-12);
    }

    #[test]
    fn zero_fast_gain_is_rejected() {
        let steps = vec![synthetic_step(1.0, 0)];
        let model = Polynomial::new(vec![0.0, 1.0]);
        for gain in [0.0, f64::NAN, f64::INFINITY] {
            let err = identify_slow(&steps, &model, gain, 0.2, &NelderMead::default()).unwrap_err();
            assert!(matches!(err, IdentifyError::InvalidArg { .. }));
        }
    }

    #[test]
    fn non_finite_initial_pole_is_rejected() {
        let steps = vec![synthetic_step(1.0, 0)];
        let model = Polynomial::new(vec![0.0, 1.0]);
        let err = identify_slow(&steps, &model, GAIN, f64::NAN, &NelderMead::default()).unwrap_err();
        assert!(matches!(
            err,
            IdentifyError::Core(FxError::NonFinite {
                what: "initial pole",
                ..
            })
        ));
    }

    #[test]
    fn no_converged_fit_is_an_error() {
        let steps = vec![synthetic_step(1.0, 0), synthetic_step(1.0, 1)];
        let model = Polynomial::new(vec![0.0, 1.0]);
        let starved = NelderMead::new(NelderMeadConfig {
            max_iterations: Some(2),
            ..NelderMeadConfig::default()
        });
        let err = identify_slow(&steps, &model, GAIN, 0.2, &starved).unwrap_err();
        assert!(matches!(
            err,
            IdentifyError::NoSuccessfulFits {
                stage: "slow",
                attempts: 2
            }
        ));
    }
}
