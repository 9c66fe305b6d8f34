//! Read-only views of a simulation for reporting.
//!
//! Snapshots are owned copies: they stay valid after the engine moves on and
//! serialize straight to JSON for whatever renders the charts.

use serde::{Deserialize, Serialize};

use crate::core::ArmId;

use super::simulation::Simulation;

/// One row of the per-arm overview.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArmSnapshot {
    pub arm: ArmId,
    pub label: String,
    pub times_played: u64,
    pub wins: u64,
    /// 0 when the arm has not been played.
    pub observed_win_rate: f64,
    pub payout: f64,
    pub posterior_alpha: f64,
    pub posterior_beta: f64,
    pub posterior_mean: f64,
}

/// Per-arm overview plus aggregates, in arm order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub arms: Vec<ArmSnapshot>,
    pub total_played: u64,
    pub total_wins: u64,
    /// 0 when nothing has been played.
    pub overall_win_rate: f64,
    pub total_payout: f64,
    pub trial_budget: u64,
    pub rounds_remaining: u64,
}

impl SimulationSnapshot {
    /// Capture the current state of `sim`.
    #[must_use]
    pub fn capture(sim: &Simulation) -> Self {
        let reward = sim.reward_per_win();
        let arms = sim
            .arms()
            .iter()
            .map(|(id, arm)| ArmSnapshot {
                arm: id,
                label: arm.label().to_owned(),
                times_played: arm.times_played(),
                wins: arm.wins(),
                observed_win_rate: arm.observed_win_rate(),
                payout: arm.payout(reward),
                posterior_alpha: arm.posterior_alpha(),
                posterior_beta: arm.posterior_beta(),
                posterior_mean: arm.posterior_mean(),
            })
            .collect();

        Self {
            arms,
            total_played: sim.total_played(),
            total_wins: sim.total_wins(),
            overall_win_rate: sim.overall_win_rate(),
            total_payout: sim.total_payout(),
            trial_budget: sim.trial_budget(),
            rounds_remaining: sim.rounds_remaining(),
        }
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.rounds_remaining == 0
    }

    /// Find an arm row by label.
    #[must_use]
    pub fn arm(&self, label: &str) -> Option<&ArmSnapshot> {
        self.arms.iter().find(|a| a.label == label)
    }
}
