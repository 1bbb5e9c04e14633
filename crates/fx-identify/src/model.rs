//! The identified actuator model and its transfer functions.

use crate::fast::FastParams;
use crate::slow::SlowParams;
use fx_solver::Polynomial;
use serde::{Deserialize, Serialize};

/// Rational transfer function with coefficients in descending powers of `s`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferFunction {
    pub numerator: Vec<f64>,
    pub denominator: Vec<f64>,
}

impl TransferFunction {
    /// Gain at `s = 0`, the ratio of the constant coefficients.
    pub fn dc_gain(&self) -> f64 {
        let constant = |c: &[f64]| c.last().copied().unwrap_or(0.0);
        constant(&self.numerator) / constant(&self.denominator)
    }
}

/// Static nonlinearity followed by the slow and fast linear dynamics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActuatorModel {
    pub static_model: Polynomial,
    pub fast: FastParams,
    pub slow: SlowParams,
}

impl ActuatorModel {
    /// `k (α² + ω²) / (s² + 2αs + α² + ω²)`
    pub fn fast_transfer_function(&self) -> TransferFunction {
        let FastParams {
            gain,
            damping,
            omega,
        } = self.fast;
        let wn2 = damping * damping + omega * omega;
        TransferFunction {
            numerator: vec![gain * wn2],
            denominator: vec![1.0, 2.0 * damping, wn2],
        }
    }

    /// `(s + z0) / (s + s0)`
    pub fn slow_transfer_function(&self) -> TransferFunction {
        TransferFunction {
            numerator: vec![1.0, self.slow.zero],
            denominator: vec![1.0, self.slow.pole],
        }
    }

    /// DC gain of the linear part; one when the slow zero was derived from the fast gain.
    pub fn combined_dc_gain(&self) -> f64 {
        self.fast_transfer_function().dc_gain() * self.slow_transfer_function().dc_gain()
    }

    /// Steady-state output for a constant input `u`.
    pub fn static_output(&self, u: f64) -> f64 {
        self.combined_dc_gain() * self.static_model.eval(u)
    }
}
