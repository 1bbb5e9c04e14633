//! Identification configuration.
//!
//! Everything [`crate::identify`] needs besides the recording itself. Only
//! the split timing is required; every other section falls back to its
//! default when omitted from YAML.

use crate::error::{IdentifyError, IdentifyResult};
use crate::fast::{FastBounds, FastOptions, FastParams};
use crate::restart::{FixedStart, RandomRestarts, RestartStrategy};
use fx_signal::SplitConfig;
use fx_solver::NelderMeadConfig;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_poly_order() -> usize {
    3
}

fn default_trials_per_step() -> usize {
    RandomRestarts::<StdRng>::DEFAULT_TRIALS_PER_STEP
}

fn default_pole_initial() -> f64 {
    0.2
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaticConfig {
    #[serde(default = "default_poly_order")]
    pub poly_order: usize,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            poly_order: default_poly_order(),
        }
    }
}

/// How fast-mode trials are planned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FastStrategyConfig {
    /// One trial per step response from the configured initial guess.
    #[default]
    Fixed,
    /// Uniform random restarts inside the bounds, reproducible from `seed`.
    Random {
        seed: u64,
        #[serde(default = "default_trials_per_step")]
        trials_per_step: usize,
    },
}

impl FastStrategyConfig {
    pub fn build(&self) -> Box<dyn RestartStrategy> {
        match *self {
            FastStrategyConfig::Fixed => Box::new(FixedStart),
            FastStrategyConfig::Random {
                seed,
                trials_per_step,
            } => Box::new(RandomRestarts::seeded(seed).with_trials_per_step(trials_per_step)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FastConfig {
    #[serde(default)]
    pub initial: FastParams,
    #[serde(default)]
    pub bounds: FastBounds,
    #[serde(default)]
    pub strategy: FastStrategyConfig,
}

impl FastConfig {
    pub fn options(&self) -> FastOptions {
        FastOptions {
            initial: self.initial,
            bounds: self.bounds,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlowConfig {
    #[serde(default = "default_pole_initial")]
    pub pole_initial: f64,
}

impl Default for SlowConfig {
    fn default() -> Self {
        Self {
            pole_initial: default_pole_initial(),
        }
    }
}

/// Full identification configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdentifyConfig {
    pub split: SplitConfig,
    #[serde(default)]
    pub static_fit: StaticConfig,
    #[serde(default)]
    pub fast: FastConfig,
    #[serde(default)]
    pub slow: SlowConfig,
    #[serde(default)]
    pub solver: NelderMeadConfig,
}

impl IdentifyConfig {
    /// Defaults for everything but the split timing.
    pub fn new(split: SplitConfig) -> Self {
        Self {
            split,
            static_fit: StaticConfig::default(),
            fast: FastConfig::default(),
            slow: SlowConfig::default(),
            solver: NelderMeadConfig::default(),
        }
    }

    pub fn validate(&self) -> IdentifyResult<()> {
        self.split.validate()?;
        self.fast.bounds.validate()?;
        if !self.fast.bounds.contains(&self.fast.initial) {
            return Err(IdentifyError::InvalidArg {
                what: "fast initial guess lies outside its bounds".to_string(),
            });
        }
        if let FastStrategyConfig::Random {
            trials_per_step: 0, ..
        } = self.fast.strategy
        {
            return Err(IdentifyError::InvalidArg {
                what: "random strategy needs at least one trial per step".to_string(),
            });
        }
        if !self.slow.pole_initial.is_finite() {
            return Err(IdentifyError::InvalidArg {
                what: format!("initial pole must be finite, got {}", self.slow.pole_initial),
            });
        }
        let tolerances = [self.solver.x_tol, self.solver.f_tol];
        if tolerances.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err(IdentifyError::InvalidArg {
                what: "solver tolerances must be finite and non-negative".to_string(),
            });
        }
        Ok(())
    }

    pub fn from_yaml_str(content: &str) -> IdentifyResult<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> IdentifyResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn load_yaml(path: &Path) -> IdentifyResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn save_yaml(&self, path: &Path) -> IdentifyResult<()> {
        self.validate()?;
        std::fs::write(path, self.to_yaml_string()?)?;
        Ok(())
    }
}
