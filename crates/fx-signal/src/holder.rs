//! Time-aligned `(time, input, output)` triples.

use crate::error::{SignalError, SignalResult};
use fx_core::ensure_all_finite;
use std::ops::Range;
use std::sync::Arc;

/// Immutable triple of time-aligned sequences.
///
/// A holder either owns a whole recording or is a window over buffers shared
/// with a [`StepResponse`](crate::StepResponse). Windows never copy samples.
#[derive(Debug, Clone)]
pub struct SignalHolder {
    time: Arc<[f64]>,
    input: Arc<[f64]>,
    output: Arc<[f64]>,
    range: Range<usize>,
}

impl SignalHolder {
    /// Create a holder that owns the given sequences.
    ///
    /// # Errors
    ///
    /// Returns error if the sequences are empty, differ in length, contain
    /// non-finite values, or if time is not strictly increasing.
    pub fn new(time: Vec<f64>, input: Vec<f64>, output: Vec<f64>) -> SignalResult<Self> {
        validate_series(&time, &input, &output)?;
        let len = time.len();
        Ok(Self {
            time: time.into(),
            input: input.into(),
            output: output.into(),
            range: 0..len,
        })
    }

    /// Read-only window over shared buffers. The caller guarantees the range is in bounds.
    pub(crate) fn window(
        time: &Arc<[f64]>,
        input: &Arc<[f64]>,
        output: &Arc<[f64]>,
        range: Range<usize>,
    ) -> Self {
        debug_assert!(range.start <= range.end && range.end <= time.len());
        Self {
            time: Arc::clone(time),
            input: Arc::clone(input),
            output: Arc::clone(output),
            range,
        }
    }

    pub fn time(&self) -> &[f64] {
        &self.time[self.range.clone()]
    }

    pub fn input(&self) -> &[f64] {
        &self.input[self.range.clone()]
    }

    pub fn output(&self) -> &[f64] {
        &self.output[self.range.clone()]
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Check the preconditions every recording must satisfy.
pub(crate) fn validate_series(time: &[f64], input: &[f64], output: &[f64]) -> SignalResult<()> {
    if time.is_empty() {
        return Err(SignalError::Empty { what: "time" });
    }
    if input.len() != time.len() {
        return Err(SignalError::LengthMismatch {
            what: "input",
            len: input.len(),
            expected: time.len(),
        });
    }
    if output.len() != time.len() {
        return Err(SignalError::LengthMismatch {
            what: "output",
            len: output.len(),
            expected: time.len(),
        });
    }

    ensure_all_finite(time, "time")?;
    ensure_all_finite(input, "input")?;
    ensure_all_finite(output, "output")?;

    if let Some(index) = time.windows(2).position(|w| w[1] <= w[0]) {
        return Err(SignalError::NonIncreasingTime {
            index: index + 1,
            previous: time[index],
            current: time[index + 1],
        });
    }
    Ok(())
}
