//! fx-core: shared foundation for flexid.
//!
//! Contains:
//! - numeric (Real + finite checks + relative error)
//! - stats (mean, median, mean absolute deviation)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod stats;

pub use error::{FxError, FxResult};
pub use numeric::*;
pub use stats::{mean, mean_abs_deviation, median};
