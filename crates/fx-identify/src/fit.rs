//! Shared trial runner and median aggregation for the dynamic identifiers.

use crate::error::{IdentifyError, IdentifyResult};
use fx_core::median;
use fx_signal::StepResponse;
use fx_solver::{Bound, Minimizer, Polynomial};
use rayon::prelude::*;
use tracing::{debug, warn};

/// Steady-state change of the intermediate signal `v = f(u)` across a switch.
pub(crate) fn steady_change(step: &StepResponse, static_model: &Polynomial) -> f64 {
    static_model.eval(step.input_final()) - static_model.eval(step.input_initial())
}

/// Run one minimisation per `(step index, start point)` trial.
///
/// Trials run in parallel; the returned parameter vectors keep the order of
/// `trials`, so aggregation does not depend on scheduling. Trials whose fit
/// window is empty (cost is `None`) or that do not converge are dropped.
pub(crate) fn fit_trials<M, C>(
    stage: &'static str,
    steps: &[StepResponse],
    trials: &[(usize, Vec<f64>)],
    bounds: Option<&[Bound]>,
    minimizer: &M,
    cost: C,
) -> IdentifyResult<Vec<Vec<f64>>>
where
    M: Minimizer + Sync,
    C: Fn(&StepResponse, &[f64]) -> Option<f64> + Sync,
{
    if let Some(&(index, _)) = trials.iter().find(|(index, _)| *index >= steps.len()) {
        return Err(IdentifyError::InvalidArg {
            what: format!(
                "{stage} trial refers to step {index} but only {} steps exist",
                steps.len()
            ),
        });
    }

    let outcomes = trials
        .par_iter()
        .map(|(index, x0)| -> IdentifyResult<Option<Vec<f64>>> {
            let step = &steps[*index];
            if cost(step, x0.as_slice()).is_none() {
                warn!(
                    stage,
                    sequence_id = step.sequence_id(),
                    "skipping step with an empty fit window"
                );
                return Ok(None);
            }

            let result = minimizer.minimize(
                |x| cost(step, x).unwrap_or(f64::INFINITY),
                x0.as_slice(),
                bounds,
            )?;
            if result.converged {
                Ok(Some(result.x))
            } else {
                debug!(
                    stage,
                    sequence_id = step.sequence_id(),
                    iterations = result.iterations,
                    cost = result.cost,
                    "fit did not converge"
                );
                Ok(None)
            }
        })
        .collect::<IdentifyResult<Vec<_>>>()?;

    Ok(outcomes.into_iter().flatten().collect())
}

/// Element-wise median over successful `N`-parameter vectors.
pub(crate) fn median_columns<const N: usize>(
    stage: &'static str,
    attempts: usize,
    successes: &[Vec<f64>],
) -> IdentifyResult<[f64; N]> {
    let mut medians = [0.0; N];
    for (k, slot) in medians.iter_mut().enumerate() {
        let column: Vec<f64> = successes.iter().map(|x| x[k]).collect();
        *slot = median(&column).ok_or(IdentifyError::NoSuccessfulFits { stage, attempts })?;
    }
    Ok(medians)
}
