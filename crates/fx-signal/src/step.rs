//! A single isolated step transition with its steady-state context.

use crate::error::{SignalError, SignalResult};
use crate::holder::{SignalHolder, validate_series};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};

/// Steady-state means before and after a switch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteadyLevels {
    pub input_initial: f64,
    pub input_final: f64,
    pub output_initial: f64,
    pub output_final: f64,
}

/// One step transition of a recording.
///
/// Time is re-based so that the switch instant is `0`. Samples with `t < 0`
/// are the tail of the previous period and feed the initial steady level.
///
/// The `after` and `fast` views are computed on first access and cached; they
/// borrow the response's buffers rather than copying them.
#[derive(Debug, Clone)]
pub struct StepResponse {
    time: Arc<[f64]>,
    input: Arc<[f64]>,
    output: Arc<[f64]>,
    levels: SteadyLevels,
    switch_index: usize,
    fast_index: usize,
    sequence_id: usize,
    after_view: OnceLock<SignalHolder>,
    fast_view: OnceLock<SignalHolder>,
}

impl StepResponse {
    /// Create a step response.
    ///
    /// # Arguments
    ///
    /// * `time`, `input`, `output` - Samples of the transition window, time re-based to the switch
    /// * `levels` - Steady-state means before and after the switch
    /// * `switch_index` - Local index of the switch instant
    /// * `fast_index` - Local index (exclusive) ending the fast sub-window
    /// * `sequence_id` - Ordinal position in the recording
    ///
    /// # Errors
    ///
    /// Returns error if the sequences are malformed or if
    /// `switch_index <= fast_index <= len` does not hold.
    pub fn new(
        time: Vec<f64>,
        input: Vec<f64>,
        output: Vec<f64>,
        levels: SteadyLevels,
        switch_index: usize,
        fast_index: usize,
        sequence_id: usize,
    ) -> SignalResult<Self> {
        validate_series(&time, &input, &output)?;
        if switch_index > fast_index || fast_index > time.len() {
            return Err(SignalError::InvalidArg {
                what: format!(
                    "step {sequence_id}: indices must satisfy switch ({switch_index}) <= fast ({fast_index}) <= len ({})",
                    time.len()
                ),
            });
        }
        Ok(Self {
            time: time.into(),
            input: input.into(),
            output: output.into(),
            levels,
            switch_index,
            fast_index,
            sequence_id,
            after_view: OnceLock::new(),
            fast_view: OnceLock::new(),
        })
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn input(&self) -> &[f64] {
        &self.input
    }

    pub fn output(&self) -> &[f64] {
        &self.output
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn levels(&self) -> &SteadyLevels {
        &self.levels
    }

    pub fn input_initial(&self) -> f64 {
        self.levels.input_initial
    }

    pub fn input_final(&self) -> f64 {
        self.levels.input_final
    }

    pub fn output_initial(&self) -> f64 {
        self.levels.output_initial
    }

    pub fn output_final(&self) -> f64 {
        self.levels.output_final
    }

    pub fn switch_index(&self) -> usize {
        self.switch_index
    }

    pub fn fast_index(&self) -> usize {
        self.fast_index
    }

    pub fn sequence_id(&self) -> usize {
        self.sequence_id
    }

    /// Samples from the switch to the end of the response.
    pub fn after_view(&self) -> &SignalHolder {
        self.after_view.get_or_init(|| {
            SignalHolder::window(
                &self.time,
                &self.input,
                &self.output,
                self.switch_index..self.time.len(),
            )
        })
    }

    /// Samples from the switch to the end of the fast response.
    pub fn fast_view(&self) -> &SignalHolder {
        self.fast_view.get_or_init(|| {
            SignalHolder::window(
                &self.time,
                &self.input,
                &self.output,
                self.switch_index..self.fast_index,
            )
        })
    }
}
