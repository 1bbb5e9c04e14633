//! End-to-end identification: split, static, fast, slow.

use crate::config::IdentifyConfig;
use crate::error::IdentifyResult;
use crate::fast::identify_fast;
use crate::model::ActuatorModel;
use crate::restart::RestartStrategy;
use crate::slow::identify_slow;
use crate::static_model::{StaticFit, identify_static};
use fx_signal::{StepResponse, split_signal};
use fx_solver::{Minimizer, NelderMead};
use tracing::info;

/// Result of a full identification run.
#[derive(Debug, Clone)]
pub struct Identification {
    pub model: ActuatorModel,
    pub static_fit: StaticFit,
    /// The step responses every stage was fitted to.
    pub steps: Vec<StepResponse>,
}

/// Identify an actuator model with the Nelder–Mead minimiser and the restart
/// strategy described by `config`.
pub fn identify(
    time: &[f64],
    input: &[f64],
    output: &[f64],
    config: &IdentifyConfig,
) -> IdentifyResult<Identification> {
    let minimizer = NelderMead::new(config.solver);
    let mut strategy = config.fast.strategy.build();
    identify_with(
        time,
        input,
        output,
        config,
        strategy.as_mut(),
        &minimizer,
    )
}

/// Identify an actuator model with a caller-supplied restart strategy and
/// minimiser. `config.fast.strategy` and `config.solver` are ignored.
pub fn identify_with<M>(
    time: &[f64],
    input: &[f64],
    output: &[f64],
    config: &IdentifyConfig,
    strategy: &mut dyn RestartStrategy,
    minimizer: &M,
) -> IdentifyResult<Identification>
where
    M: Minimizer + Sync,
{
    config.validate()?;

    let steps = split_signal(time, input, output, &config.split)?;
    let static_fit = identify_static(&steps, config.static_fit.poly_order)?;
    let fast = identify_fast(
        &steps,
        &static_fit.model,
        &config.fast.options(),
        strategy,
        minimizer,
    )?;
    let slow = identify_slow(
        &steps,
        &static_fit.model,
        fast.gain,
        config.slow.pole_initial,
        minimizer,
    )?;

    let model = ActuatorModel {
        static_model: static_fit.model.clone(),
        fast,
        slow,
    };
    info!(
        steps = steps.len(),
        dc_gain = model.combined_dc_gain(),
        "actuator model identified"
    );
    Ok(Identification {
        model,
        static_fit,
        steps,
    })
}
