//! Synthetic step-test recordings generated from known models.

#![allow(dead_code)]

use fx_identify::{FastParams, fast_response, slow_response};
use fx_signal::{SplitConfig, StepResponse, split_signal};
use fx_solver::Polynomial;

/// Input level held during each period; period 0 is start-up.
pub const LEVELS: [f64; 7] = [0.2, 0.8, 0.4, 1.0, 0.6, 0.3, 0.9];
pub const PERIOD: f64 = 10.0;

/// `f(u) = 2u² + 1`
pub fn nonlinearity(u: f64) -> f64 {
    2.0 * u * u + 1.0
}

pub fn static_model() -> Polynomial {
    Polynomial::new(vec![1.0, 0.0, 2.0])
}

pub fn fast_truth() -> FastParams {
    FastParams::new(0.7, 5.0, 20.0)
}

pub const SLOW_POLE: f64 = 1.0;

/// Output settles to `k·Δf` with the fast transient only.
pub fn fast_unit_step(tau: f64) -> f64 {
    fast_response(tau, &fast_truth())
}

/// Output jumps to `k·Δf` and creeps to `Δf` through the slow mode only.
pub fn slow_unit_step(tau: f64) -> f64 {
    let k = fast_truth().gain;
    k * slow_response(tau, SLOW_POLE, SLOW_POLE / k)
}

/// Both modes: fast transient on top of the slow creep, unit DC gain.
pub fn combined_unit_step(tau: f64) -> f64 {
    let k = fast_truth().gain;
    1.0 - (1.0 - k) * (-SLOW_POLE * tau).exp() + fast_unit_step(tau) - k
}

/// Staircase recording over [`LEVELS`], output built by superposing
/// `unit_step` responses to every change of `f(u)`.
pub fn recording(dt: f64, unit_step: impl Fn(f64) -> f64) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let per_period = (PERIOD / dt).round() as usize;
    let n = LEVELS.len() * per_period;

    let mut time = Vec::with_capacity(n);
    let mut input = Vec::with_capacity(n);
    let mut output = Vec::with_capacity(n);
    for i in 0..n {
        let period = i / per_period;
        let mut y = nonlinearity(LEVELS[0]);
        for q in 1..=period {
            let tau = (i - q * per_period) as f64 * dt;
            y += (nonlinearity(LEVELS[q]) - nonlinearity(LEVELS[q - 1])) * unit_step(tau);
        }
        time.push(i as f64 * dt);
        input.push(LEVELS[period]);
        output.push(y);
    }
    (time, input, output)
}

pub fn split_config(duration_fast: f64) -> SplitConfig {
    SplitConfig::new(PERIOD, duration_fast)
}

pub fn steps(dt: f64, duration_fast: f64, unit_step: impl Fn(f64) -> f64) -> Vec<StepResponse> {
    let (time, input, output) = recording(dt, unit_step);
    split_signal(&time, &input, &output, &split_config(duration_fast)).unwrap()
}
