//! Step-test recordings and their segmentation into step responses.
//!
//! A long recording of `(time, input, output)` is cut by the splitter into one
//! [`StepResponse`] per switching period. Each step response keeps its own
//! window of samples plus the steady-state levels before and after the switch,
//! and hands out read-only [`SignalHolder`] views of the parts the identifiers
//! fit against.

pub mod error;
pub mod holder;
pub mod split;
pub mod step;

pub use error::{SignalError, SignalResult};
pub use holder::SignalHolder;
pub use split::{SplitConfig, nearest_index, split_signal};
pub use step::{SteadyLevels, StepResponse};
