//! Segmentation of a step-test recording into step responses.
//!
//! The input is assumed to switch every `period_switch` seconds, starting at
//! `t = period_switch`. The first period is treated as start-up and skipped.
//! The period is not checked against the actual switching instants in the
//! input, so a drifting period silently misaligns the windows.

use crate::error::{SignalError, SignalResult};
use crate::holder::validate_series;
use crate::step::{SteadyLevels, StepResponse};
use fx_core::mean;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::debug;

fn default_relative_start_extension() -> f64 {
    0.01
}

fn default_steady_end_window() -> f64 {
    0.01
}

/// Segmentation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Switching period of the input (seconds).
    pub period_switch: f64,
    /// Length of the fast sub-window after each switch (seconds).
    pub duration_fast: f64,
    /// Pre-switch window, as a fraction of the period, used for the initial levels.
    #[serde(default = "default_relative_start_extension")]
    pub relative_start_extension: f64,
    /// Window at the end of the period, as a fraction of the period, used for the final levels.
    #[serde(default = "default_steady_end_window")]
    pub steady_end_window: f64,
}

impl SplitConfig {
    /// Configuration with the default 1% start extension and steady window.
    pub fn new(period_switch: f64, duration_fast: f64) -> Self {
        Self {
            period_switch,
            duration_fast,
            relative_start_extension: default_relative_start_extension(),
            steady_end_window: default_steady_end_window(),
        }
    }

    pub fn with_start_extension(mut self, fraction: f64) -> Self {
        self.relative_start_extension = fraction;
        self
    }

    pub fn with_steady_window(mut self, fraction: f64) -> Self {
        self.steady_end_window = fraction;
        self
    }

    pub fn validate(&self) -> SignalResult<()> {
        if !(self.period_switch.is_finite() && self.period_switch > 0.0) {
            return Err(SignalError::InvalidArg {
                what: format!("period_switch must be positive, got {}", self.period_switch),
            });
        }
        if !(self.duration_fast.is_finite() && self.duration_fast >= 0.0) {
            return Err(SignalError::InvalidArg {
                what: format!(
                    "duration_fast must be non-negative, got {}",
                    self.duration_fast
                ),
            });
        }
        for (name, fraction) in [
            ("relative_start_extension", self.relative_start_extension),
            ("steady_end_window", self.steady_end_window),
        ] {
            if !(0.0..1.0).contains(&fraction) {
                return Err(SignalError::InvalidArg {
                    what: format!("{name} must lie in [0, 1), got {fraction}"),
                });
            }
        }
        Ok(())
    }
}

/// Index of the sample closest to `target` in a strictly increasing `time`.
///
/// Ties go to the earlier sample. Targets outside the recording map to the
/// first or last sample.
pub fn nearest_index(time: &[f64], target: f64) -> usize {
    let upper = time.partition_point(|&t| t < target);
    if upper == 0 {
        return 0;
    }
    if upper == time.len() {
        return time.len() - 1;
    }
    let below = upper - 1;
    if target - time[below] <= time[upper] - target {
        below
    } else {
        upper
    }
}

/// Split a recording into one [`StepResponse`] per switching period.
///
/// Switch instants are `k * period_switch` for `k = 1, 2, ...` while
/// `switch < final_time - period_switch`. Each response covers
/// `[switch - extension, switch + period)` and carries the mean input/output
/// before the switch and over the steady window at the end of the period.
///
/// # Errors
///
/// Returns error if the recording or configuration violates its preconditions,
/// or if an averaging window contains no samples.
pub fn split_signal(
    time: &[f64],
    input: &[f64],
    output: &[f64],
    config: &SplitConfig,
) -> SignalResult<Vec<StepResponse>> {
    validate_series(time, input, output)?;
    config.validate()?;

    let period = config.period_switch;
    let final_time = time[time.len() - 1];
    let mut responses = Vec::new();

    let mut sequence_id = 0;
    loop {
        let switch = period * (sequence_id + 1) as f64;
        if switch >= final_time - period {
            break;
        }

        let start = switch - config.relative_start_extension * period;
        let end = switch + period;
        let fast = switch + config.duration_fast;
        let steady = end - config.steady_end_window * period;

        let start_idx = nearest_index(time, start);
        let end_idx = nearest_index(time, end);
        let switch_idx = nearest_index(time, switch);
        let fast_idx = nearest_index(time, fast).clamp(switch_idx, end_idx);
        let steady_idx = nearest_index(time, steady);

        let initial = start_idx..switch_idx;
        let settled = steady_idx..end_idx;
        let levels = SteadyLevels {
            input_initial: window_mean(input, initial.clone(), "initial", sequence_id)?,
            input_final: window_mean(input, settled.clone(), "steady", sequence_id)?,
            output_initial: window_mean(output, initial, "initial", sequence_id)?,
            output_final: window_mean(output, settled, "steady", sequence_id)?,
        };

        let local_time = time[start_idx..end_idx].iter().map(|t| t - switch).collect();
        responses.push(StepResponse::new(
            local_time,
            input[start_idx..end_idx].to_vec(),
            output[start_idx..end_idx].to_vec(),
            levels,
            switch_idx - start_idx,
            fast_idx - start_idx,
            sequence_id,
        )?);

        sequence_id += 1;
    }

    debug!(
        count = responses.len(),
        period, final_time, "split recording into step responses"
    );
    Ok(responses)
}

fn window_mean(
    values: &[f64],
    range: Range<usize>,
    window: &'static str,
    sequence_id: usize,
) -> SignalResult<f64> {
    values
        .get(range)
        .and_then(mean)
        .ok_or(SignalError::EmptyWindow {
            window,
            sequence_id,
        })
}
