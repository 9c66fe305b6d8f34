//! Simulation configuration.
//!
//! A simulation is configured once at construction:
//! - `ArmConfig`: an arm's label and its hidden win probability
//! - `SimulationConfig`: the ordered arms plus reward, budget and seed
//!
//! Nothing here changes after the engine is built.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::error::{BanditError, BanditResult};

/// Default reward credited per win.
pub const DEFAULT_REWARD_PER_WIN: f64 = 0.40;

/// Default number of trials a simulation may run.
pub const DEFAULT_TRIAL_BUDGET: u64 = 6000;

/// Default RNG seed.
pub const DEFAULT_SEED: u64 = 1;

/// Configuration for a single arm.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArmConfig {
    /// Display label, unique within a simulation (e.g. `"A"`).
    pub label: String,

    /// Probability that one trial on this arm is a win.
    ///
    /// Only the reward generator reads this; selection policies never do.
    pub true_win_probability: f64,
}

impl ArmConfig {
    /// Create a new arm configuration.
    pub fn new(label: impl Into<String>, true_win_probability: f64) -> Self {
        Self {
            label: label.into(),
            true_win_probability,
        }
    }
}

/// Complete simulation configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Arms, in the fixed order used for iteration and tie-breaking.
    pub arms: Vec<ArmConfig>,

    /// Payout credited for each win.
    pub reward_per_win: f64,

    /// Total number of trials available across all arms.
    pub trial_budget: u64,

    /// Seed for the reward and sampling streams.
    /// Same seed produces identical simulations.
    pub seed: u64,
}

impl Default for SimulationConfig {
    /// Three arms A/B/C with win rates 3%, 2% and 3.5%.
    fn default() -> Self {
        Self {
            arms: vec![
                ArmConfig::new("A", 0.03),
                ArmConfig::new("B", 0.02),
                ArmConfig::new("C", 0.035),
            ],
            reward_per_win: DEFAULT_REWARD_PER_WIN,
            trial_budget: DEFAULT_TRIAL_BUDGET,
            seed: DEFAULT_SEED,
        }
    }
}

impl SimulationConfig {
    /// Create an empty configuration with default reward, budget and seed.
    ///
    /// Add arms with [`with_arm`](Self::with_arm).
    pub fn new() -> Self {
        Self {
            arms: Vec::new(),
            ..Self::default()
        }
    }

    /// Append an arm.
    #[must_use]
    pub fn with_arm(mut self, label: impl Into<String>, true_win_probability: f64) -> Self {
        self.arms.push(ArmConfig::new(label, true_win_probability));
        self
    }

    /// Set the reward credited per win.
    #[must_use]
    pub fn with_reward_per_win(mut self, reward: f64) -> Self {
        self.reward_per_win = reward;
        self
    }

    /// Set the trial budget.
    #[must_use]
    pub fn with_trial_budget(mut self, budget: u64) -> Self {
        self.trial_budget = budget;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check that this configuration can build a simulation.
    pub fn validate(&self) -> BanditResult<()> {
        if self.arms.is_empty() {
            return Err(BanditError::InvalidConfig("at least one arm is required".into()));
        }
        if self.arms.len() > 255 {
            return Err(BanditError::InvalidConfig(format!(
                "at most 255 arms supported, got {}",
                self.arms.len()
            )));
        }

        let mut seen = FxHashSet::default();
        for arm in &self.arms {
            if arm.label.is_empty() {
                return Err(BanditError::InvalidConfig("arm labels must not be empty".into()));
            }
            if !seen.insert(arm.label.as_str()) {
                return Err(BanditError::InvalidConfig(format!(
                    "duplicate arm label {:?}",
                    arm.label
                )));
            }
            let p = arm.true_win_probability;
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(BanditError::InvalidConfig(format!(
                    "arm {:?} win probability {} is outside [0, 1]",
                    arm.label, p
                )));
            }
        }

        if !self.reward_per_win.is_finite() || self.reward_per_win < 0.0 {
            return Err(BanditError::InvalidConfig(format!(
                "reward per win {} must be finite and non-negative",
                self.reward_per_win
            )));
        }

        Ok(())
    }
}
