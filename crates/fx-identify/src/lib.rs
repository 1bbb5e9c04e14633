//! Identification of flexible-material actuator models from step-test data.
//!
//! The identified model is a Hammerstein-type cascade:
//!
//! ```text
//! v = f(u)                                  static nonlinearity (polynomial)
//! y = G_slow(s) · G_fast(s) · v
//! G_slow(s) = (s + z0) / (s + s0)
//! G_fast(s) = k (α² + ω²) / (s² + 2αs + α² + ω²)
//! ```
//!
//! with `G_slow(0) · G_fast(0) = 1`, so that the nonlinearity carries the
//! overall gain.
//!
//! # Pipeline
//!
//! 1. [`fx_signal::split_signal`] cuts the recording into step responses
//! 2. [`identify_static`] fits `f` to the steady-state `(input, output)` pairs
//! 3. [`identify_fast`] fits `(k, α, ω)` per response (or per random restart)
//!    and takes the median of each parameter
//! 4. [`identify_slow`] fits `s0` per response with `k` held fixed and takes
//!    the median
//!
//! [`identify`] runs all four stages from an [`IdentifyConfig`].

pub mod config;
pub mod error;
pub mod fast;
mod fit;
pub mod model;
pub mod pipeline;
pub mod restart;
pub mod slow;
pub mod static_model;

pub use config::{FastConfig, FastStrategyConfig, IdentifyConfig, SlowConfig, StaticConfig};
pub use error::{IdentifyError, IdentifyResult};
pub use fast::{FastBounds, FastOptions, FastParams, fast_response, identify_fast, predict_fast_output};
pub use model::{ActuatorModel, TransferFunction};
pub use pipeline::{Identification, identify, identify_with};
pub use restart::{FixedStart, RandomRestarts, RestartStrategy, Trial};
pub use slow::{SlowParams, identify_slow, predict_slow_output, slow_response};
pub use static_model::{StaticFit, identify_static};
