//! Restart strategies for the fast-mode fit.
//!
//! A strategy decides which step responses are fitted and from which start
//! points. Planning happens up front and sequentially, so a seeded random
//! strategy always produces the same trials regardless of how the fits are
//! scheduled afterwards.

use crate::fast::{FastBounds, FastParams};
use fx_solver::Bound;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// One planned minimisation: fit step `step` starting from `initial`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trial {
    pub step: usize,
    pub initial: FastParams,
}

/// Plans the trials of one fast-mode identification.
pub trait RestartStrategy {
    /// Plan trials over `step_count` step responses.
    ///
    /// Every returned `Trial::step` must be below `step_count`.
    fn plan(&mut self, step_count: usize, initial: &FastParams, bounds: &FastBounds) -> Vec<Trial>;
}

/// One trial per step response, all from the same initial guess.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedStart;

impl RestartStrategy for FixedStart {
    fn plan(&mut self, step_count: usize, initial: &FastParams, _: &FastBounds) -> Vec<Trial> {
        (0..step_count)
            .map(|step| Trial {
                step,
                initial: *initial,
            })
            .collect()
    }
}

/// Random restarts: `trials_per_step × N` trials, each on a uniformly chosen
/// step response from a start point drawn uniformly inside the bounds.
#[derive(Debug, Clone)]
pub struct RandomRestarts<R> {
    rng: R,
    trials_per_step: usize,
}

impl<R: Rng> RandomRestarts<R> {
    pub const DEFAULT_TRIALS_PER_STEP: usize = 5;

    pub fn new(rng: R) -> Self {
        Self {
            rng,
            trials_per_step: Self::DEFAULT_TRIALS_PER_STEP,
        }
    }

    pub fn with_trials_per_step(mut self, trials_per_step: usize) -> Self {
        self.trials_per_step = trials_per_step;
        self
    }

    fn sample(&mut self, bound: Bound) -> f64 {
        if bound.lower >= bound.upper {
            bound.lower
        } else {
            self.rng.gen_range(bound.lower..=bound.upper)
        }
    }
}

impl RandomRestarts<StdRng> {
    /// Deterministic random restarts from a seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RestartStrategy for RandomRestarts<R> {
    fn plan(&mut self, step_count: usize, _: &FastParams, bounds: &FastBounds) -> Vec<Trial> {
        if step_count == 0 {
            return Vec::new();
        }
        (0..self.trials_per_step * step_count)
            .map(|_| {
                let step = self.rng.gen_range(0..step_count);
                let initial = FastParams::new(
                    self.sample(bounds.gain),
                    self.sample(bounds.damping),
                    self.sample(bounds.omega),
                );
                Trial { step, initial }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_plans_one_trial_per_step() {
        let initial = FastParams::default();
        let plan = FixedStart.plan(4, &initial, &FastBounds::default());
        assert_eq!(plan.len(), 4);
        for (k, trial) in plan.iter().enumerate() {
            assert_eq!(trial.step, k);
            assert_eq!(trial.initial, initial);
        }
    }

    #[test]
    fn random_plans_five_trials_per_step_inside_bounds() {
        let bounds = FastBounds::default();
        let plan = RandomRestarts::seeded(11).plan(3, &FastParams::default(), &bounds);
        assert_eq!(plan.len(), 15);
        assert!(plan.iter().all(|t| t.step < 3 && bounds.contains(&t.initial)));
    }

    #[test]
    fn random_plan_is_reproducible_from_seed() {
        let bounds = FastBounds::default();
        let a = RandomRestarts::seeded(42).plan(6, &FastParams::default(), &bounds);
        let b = RandomRestarts::seeded(42).plan(6, &FastParams::default(), &bounds);
        let c = RandomRestarts::seeded(43).plan(6, &FastParams::default(), &bounds);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn random_plan_reaches_every_step() {
        let plan = RandomRestarts::seeded(3)
            .with_trials_per_step(50)
            .plan(4, &FastParams::default(), &FastBounds::default());
        for step in 0..4 {
            assert!(plan.iter().any(|t| t.step == step));
        }
    }

    #[test]
    fn degenerate_bound_pins_the_parameter() {
        let bounds = FastBounds {
            gain: Bound {
                lower: 0.4,
                upper: 0.4,
            },
            ..FastBounds::default()
        };
        let plan = RandomRestarts::seeded(5).plan(2, &FastParams::default(), &bounds);
        assert!(plan.iter().all(|t| t.initial.gain == 0.4));
    }

    #[test]
    fn no_steps_no_trials() {
        let plan = RandomRestarts::seeded(1).plan(0, &FastParams::default(), &FastBounds::default());
        assert!(plan.is_empty());
    }
}
