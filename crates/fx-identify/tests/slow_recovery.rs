//! Integration test: slow-mode recovery with the fast gain held fixed.

mod common;

use common::{SLOW_POLE, fast_truth, slow_unit_step, static_model, steps};
use fx_core::relative_error;
use fx_identify::{IdentifyError, SlowParams, identify_slow, predict_slow_output};
use fx_solver::NelderMead;

const DT: f64 = 0.01;

#[test]
fn recovers_pole_and_zero() {
    let steps = steps(DT, 0.2, slow_unit_step);
    let gain = fast_truth().gain;

    let fitted = identify_slow(&steps, &static_model(), gain, 0.2, &NelderMead::default()).unwrap();
    assert!(relative_error(fitted.pole, SLOW_POLE) < 0.02, "{fitted:?}");
    assert!((fitted.zero - fitted.pole / gain).abs() < 1e-12);
}

#[test]
fn prediction_starts_at_fast_gain_and_tends_to_full_step() {
    let steps = steps(DT, 0.2, slow_unit_step);
    let gain = fast_truth().gain;
    let model = static_model();
    let params = SlowParams::from_pole(SLOW_POLE, gain);

    let step = &steps[1];
    let dv = model.eval(step.input_final()) - model.eval(step.input_initial());
    let y = predict_slow_output(step, &params, &model, gain);

    assert_eq!(y.len(), step.after_view().len());
    assert!((y[0] - (step.output_initial() + gain * dv)).abs() < 1e-9);
    let last = y[y.len() - 1];
    assert!((last - (step.output_initial() + dv)).abs() < 1e-3 * dv.abs());
}

#[test]
fn fitted_prediction_matches_measurement() {
    let steps = steps(DT, 0.2, slow_unit_step);
    let gain = fast_truth().gain;
    let model = static_model();
    let fitted = identify_slow(&steps, &model, gain, 0.2, &NelderMead::default()).unwrap();

    for step in &steps {
        let predicted = predict_slow_output(step, &fitted, &model, gain);
        let worst = predicted
            .iter()
            .zip(step.after_view().output())
            .map(|(p, m)| (p - m).abs())
            .fold(0.0, f64::max);
        assert!(worst < 0.02, "step {}: worst residual {worst}", step.sequence_id());
    }
}

#[test]
fn zero_fast_gain_is_invalid() {
    let steps = steps(DT, 0.2, slow_unit_step);
    let err = identify_slow(&steps, &static_model(), 0.0, 0.2, &NelderMead::default()).unwrap_err();
    assert!(matches!(err, IdentifyError::InvalidArg { .. }));
}
