//! Small robust statistics used by the identifiers.
//!
//! All functions return `None` for empty input instead of NaN, so callers must
//! decide what an empty sample means for them.

use crate::numeric::Real;

/// Arithmetic mean.
pub fn mean(values: &[Real]) -> Option<Real> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<Real>() / values.len() as Real)
}

/// Median with the usual even-length convention (mean of the two middle values).
///
/// Invariant to the order of `values`.
pub fn median(values: &[Real]) -> Option<Real> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some(0.5 * (sorted[mid - 1] + sorted[mid]))
    } else {
        Some(sorted[mid])
    }
}

/// Mean absolute deviation between a model and a measurement, `mean(|model - measured|)`.
///
/// Returns `None` if the slices are empty or differ in length.
pub fn mean_abs_deviation(model: &[Real], measured: &[Real]) -> Option<Real> {
    if model.is_empty() || model.len() != measured.len() {
        return None;
    }
    let sum: Real = model
        .iter()
        .zip(measured)
        .map(|(m, y)| (m - y).abs())
        .sum();
    Some(sum / model.len() as Real)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_inputs_have_no_statistics() {
        assert_eq!(mean(&[]), None);
        assert_eq!(median(&[]), None);
        assert_eq!(mean_abs_deviation(&[], &[]), None);
    }

    #[test]
    fn median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[7.5]), Some(7.5));
    }

    #[test]
    fn mean_abs_deviation_basic() {
        let mad = mean_abs_deviation(&[1.0, 2.0, 3.0], &[1.5, 2.0, 2.0]).unwrap();
        assert!((mad - 0.5).abs() < 1e-12);
        assert_eq!(mean_abs_deviation(&[1.0], &[1.0, 2.0]), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn median_is_order_invariant(values in prop::collection::vec(-1e6_f64..1e6_f64, 1..40)) {
            let mut reversed = values.clone();
            reversed.reverse();
            let mut rotated = values.clone();
            rotated.rotate_left(values.len() / 3);

            let m = median(&values).unwrap();
            prop_assert_eq!(m, median(&reversed).unwrap());
            prop_assert_eq!(m, median(&rotated).unwrap());
        }

        #[test]
        fn median_tolerates_minority_outliers(
            clean in prop::collection::vec(-100.0_f64..100.0_f64, 1..30),
            outlier_sign in prop::bool::ANY,
        ) {
            let n = clean.len();
            let max_outliers = (n - 1) / 2;
            let mut contaminated = clean.clone();
            let big = if outlier_sign { 1e12 } else { -1e12 };
            for v in contaminated.iter_mut().take(max_outliers) {
                *v = big;
            }

            let survivors = &clean[max_outliers..];
            let lo = survivors.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = survivors.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let m = median(&contaminated).unwrap();
            prop_assert!(m >= lo && m <= hi, "median {} outside [{}, {}]", m, lo, hi);
        }
    }
}
