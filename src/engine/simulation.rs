//! Simulation state: per-arm counters, posteriors and aggregates.
//!
//! All derived statistics (win rates, payouts, rounds remaining) are
//! computed from the stored counters on read, so they can never drift from
//! them. The only mutation is [`Simulation::record`], one trial at a time.

use crate::core::{ArmId, ArmMap, BanditResult, SimulationConfig};

/// Divide, reporting 0 for an empty denominator.
pub(crate) fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// State of one arm.
///
/// `posterior_alpha == 1 + wins` and `posterior_beta == 1 + losses` hold
/// after every trial (uniform Beta(1, 1) prior).
#[derive(Clone, Debug, PartialEq)]
pub struct ArmState {
    label: String,
    true_win_probability: f64,
    times_played: u64,
    wins: u64,
    posterior_alpha: f64,
    posterior_beta: f64,
}

impl ArmState {
    fn new(label: String, true_win_probability: f64) -> Self {
        Self {
            label,
            true_win_probability,
            times_played: 0,
            wins: 0,
            posterior_alpha: 1.0,
            posterior_beta: 1.0,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn times_played(&self) -> u64 {
        self.times_played
    }

    #[must_use]
    pub fn wins(&self) -> u64 {
        self.wins
    }

    #[must_use]
    pub fn losses(&self) -> u64 {
        self.times_played - self.wins
    }

    #[must_use]
    pub fn posterior_alpha(&self) -> f64 {
        self.posterior_alpha
    }

    #[must_use]
    pub fn posterior_beta(&self) -> f64 {
        self.posterior_beta
    }

    /// Mean of the posterior Beta distribution.
    #[must_use]
    pub fn posterior_mean(&self) -> f64 {
        self.posterior_alpha / (self.posterior_alpha + self.posterior_beta)
    }

    /// `wins / times_played`, or 0 before the first trial.
    #[must_use]
    pub fn observed_win_rate(&self) -> f64 {
        ratio(self.wins, self.times_played)
    }

    /// Money won on this arm.
    #[must_use]
    pub fn payout(&self, reward_per_win: f64) -> f64 {
        self.wins as f64 * reward_per_win
    }

    /// Hidden ground truth; only the reward generator reads it.
    pub(crate) fn true_win_probability(&self) -> f64 {
        self.true_win_probability
    }
}

/// The arms of one bandit problem plus aggregate counters.
#[derive(Clone, Debug, PartialEq)]
pub struct Simulation {
    arms: ArmMap<ArmState>,
    reward_per_win: f64,
    trial_budget: u64,
    total_played: u64,
    total_wins: u64,
}

impl Simulation {
    /// Build a fresh simulation from a validated configuration.
    pub fn from_config(config: &SimulationConfig) -> BanditResult<Self> {
        config.validate()?;

        let arms = ArmMap::from_values(
            config
                .arms
                .iter()
                .map(|a| ArmState::new(a.label.clone(), a.true_win_probability)),
        );

        Ok(Self {
            arms,
            reward_per_win: config.reward_per_win,
            trial_budget: config.trial_budget,
            total_played: 0,
            total_wins: 0,
        })
    }

    #[must_use]
    pub fn arms(&self) -> &ArmMap<ArmState> {
        &self.arms
    }

    #[must_use]
    pub fn arm(&self, arm: ArmId) -> Option<&ArmState> {
        self.arms.get(arm)
    }

    #[must_use]
    pub fn arm_count(&self) -> usize {
        self.arms.arm_count()
    }

    #[must_use]
    pub fn reward_per_win(&self) -> f64 {
        self.reward_per_win
    }

    #[must_use]
    pub fn trial_budget(&self) -> u64 {
        self.trial_budget
    }

    #[must_use]
    pub fn total_played(&self) -> u64 {
        self.total_played
    }

    #[must_use]
    pub fn total_wins(&self) -> u64 {
        self.total_wins
    }

    /// `total_wins / total_played`, or 0 before the first trial.
    #[must_use]
    pub fn overall_win_rate(&self) -> f64 {
        ratio(self.total_wins, self.total_played)
    }

    #[must_use]
    pub fn total_payout(&self) -> f64 {
        self.total_wins as f64 * self.reward_per_win
    }

    #[must_use]
    pub fn rounds_remaining(&self) -> u64 {
        self.trial_budget.saturating_sub(self.total_played)
    }

    /// Terminal once the budget is spent.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.rounds_remaining() == 0
    }

    /// Apply one trial outcome to `arm`.
    ///
    /// Callers check the arm and the remaining budget first.
    pub(crate) fn record(&mut self, arm: ArmId, won: bool) {
        debug_assert!(!self.is_exhausted());

        let state = &mut self.arms[arm];
        state.times_played += 1;
        self.total_played += 1;

        if won {
            state.wins += 1;
            state.posterior_alpha += 1.0;
            self.total_wins += 1;
        } else {
            state.posterior_beta += 1.0;
        }
    }
}
