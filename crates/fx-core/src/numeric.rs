use crate::error::{FxError, FxResult};

/// Floating point type used throughout system
pub type Real = f64;

/// `|estimate - truth| / |truth|`, falling back to the absolute error for a zero truth.
pub fn relative_error(estimate: Real, truth: Real) -> Real {
    let diff = (estimate - truth).abs();
    if truth == 0.0 { diff } else { diff / truth.abs() }
}

/// Pass `v` through if it is finite.
pub fn ensure_finite(v: Real, what: &'static str) -> FxResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(FxError::NonFinite { what, value: v })
    }
}

/// Check every element of a sequence, reporting the first non-finite one.
pub fn ensure_all_finite(values: &[Real], what: &'static str) -> FxResult<()> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(&value) => Err(FxError::NonFinite { what, value }),
        None => Ok(()),
    }
}
