//! Static nonlinearity identification.

use crate::error::IdentifyResult;
use fx_signal::StepResponse;
use fx_solver::Polynomial;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Fitted static nonlinearity together with the points it was fitted to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticFit {
    pub model: Polynomial,
    pub input_points: Vec<f64>,
    pub output_points: Vec<f64>,
    pub fitted_points: Vec<f64>,
}

impl StaticFit {
    /// Root-mean-square in-sample residual.
    pub fn residual_rms(&self) -> f64 {
        let n = self.output_points.len();
        if n == 0 {
            return 0.0;
        }
        let sum: f64 = self.residuals().map(|r| r * r).sum();
        (sum / n as f64).sqrt()
    }

    /// Largest absolute in-sample residual.
    pub fn max_abs_residual(&self) -> f64 {
        self.residuals().map(f64::abs).fold(0.0, f64::max)
    }

    fn residuals(&self) -> impl Iterator<Item = f64> + '_ {
        self.output_points
            .iter()
            .zip(&self.fitted_points)
            .map(|(y, f)| y - f)
    }
}

/// Fit a polynomial of order `poly_order` to the final steady-state
/// `(input, output)` pairs of the step responses.
///
/// Only the final levels are used; the initial level of each response is the
/// final level of the previous one and would double-count it.
///
/// # Errors
///
/// Returns a solver error if there are too few distinct points for the order.
pub fn identify_static(steps: &[StepResponse], poly_order: usize) -> IdentifyResult<StaticFit> {
    let input_points: Vec<f64> = steps.iter().map(StepResponse::input_final).collect();
    let output_points: Vec<f64> = steps.iter().map(StepResponse::output_final).collect();

    let model = Polynomial::fit(&input_points, &output_points, poly_order)?;
    let fitted_points = model.eval_many(&input_points);
    let fit = StaticFit {
        model,
        input_points,
        output_points,
        fitted_points,
    };

    info!(
        points = fit.input_points.len(),
        order = poly_order,
        residual_rms = fit.residual_rms(),
        "static nonlinearity identified"
    );
    Ok(fit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IdentifyError;
    use fx_signal::SteadyLevels;
    use fx_solver::SolverError;

    fn level_step(u_prev: f64, u: f64, f: impl Fn(f64) -> f64, sequence_id: usize) -> StepResponse {
        let levels = SteadyLevels {
            input_initial: u_prev,
            input_final: u,
            output_initial: f(u_prev),
            output_final: f(u),
        };
        let time = vec![-0.1, 0.0, 0.1, 0.2];
        let input = vec![u_prev, u, u, u];
        let output = vec![f(u_prev), f(u), f(u), f(u)];
        StepResponse::new(time, input, output, levels, 1, 2, sequence_id).unwrap()
    }

    fn staircase(levels: &[f64], f: impl Fn(f64) -> f64 + Copy) -> Vec<StepResponse> {
        levels
            .windows(2)
            .enumerate()
            .map(|(k, w)| level_step(w[0], w[1], f, k))
            .collect()
    }

    #[test]
    fn recovers_quadratic() {
        let f = |u: f64| 2.0 * u * u + 1.0;
        let steps = staircase(&[0.0, 0.2, 0.8, 0.4, 1.0, 0.6, 0.3, 0.9], f);
        let fit = identify_static(&steps, 3).unwrap();

        let expected = [1.0, 0.0, 2.0, 0.0];
        for (c, e) in fit.model.coefficients().iter().zip(expected) {
            assert!((c - e).abs() < 1e-6, "{c} vs {e}");
        }
        assert_eq!(fit.input_points.len(), 7);
        assert!(fit.residual_rms() < 1e-9);
        assert!(fit.max_abs_residual() < 1e-9);
    }

    #[test]
    fn uses_final_levels_only() {
        let f = |u: f64| 3.0 * u - 1.0;
        let steps = staircase(&[5.0, 1.0, 2.0, 3.0], f);
        let fit = identify_static(&steps, 1).unwrap();
        assert_eq!(fit.input_points, vec![1.0, 2.0, 3.0]);
        assert!((fit.model.eval(5.0) - 14.0).abs() < 1e-9);
    }

    #[test]
    fn residuals_report_misfit() {
        let steps = staircase(&[0.0, 0.0, 1.0, 2.0], |u| u * u);
        let fit = identify_static(&steps, 1).unwrap();
        assert!(fit.residual_rms() > 0.1);
        assert!(fit.max_abs_residual() >= fit.residual_rms());
    }

    #[test]
    fn too_few_points_is_a_numeric_error() {
        let steps = staircase(&[0.0, 0.2, 0.8, 0.4], |u| u);
        let err = identify_static(&steps, 3).unwrap_err();
        assert!(matches!(
            err,
            IdentifyError::Solver(SolverError::RankDeficient { required: 4, .. })
        ));
    }
}
