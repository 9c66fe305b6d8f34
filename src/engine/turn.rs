//! Turns: the unit of play an operator chooses.
//!
//! A manual turn commits one arm for a batch of rounds. A Thompson sampling
//! turn reselects the arm before every single trial; it never commits to an
//! arm for more than one round.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{ArmId, BanditError, BanditResult};

use super::bandit::BanditEngine;
use super::snapshot::SimulationSnapshot;

/// How the next batch of trials is chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum Turn {
    /// Play `rounds` trials on an operator-chosen arm.
    Manual { arm: ArmId, rounds: u64 },

    /// Thompson sampling, one selection per trial.
    ///
    /// `None` keeps going until the trial budget is spent.
    ThompsonSampling { rounds: Option<u64> },
}

impl Turn {
    /// A sampling turn that runs out the remaining budget.
    #[must_use]
    pub const fn thompson_to_completion() -> Self {
        Self::ThompsonSampling { rounds: None }
    }
}

impl BanditEngine {
    /// Play one turn and return the state after it.
    pub fn play_turn(&mut self, turn: Turn) -> BanditResult<SimulationSnapshot> {
        match turn {
            Turn::Manual { arm, rounds } => self.play_rounds(arm, rounds),
            Turn::ThompsonSampling { rounds } => {
                let limit = match rounds {
                    Some(0) => return Err(BanditError::ZeroRounds),
                    Some(n) => n,
                    None => self.rounds_remaining(),
                };

                let mut played = 0u64;
                while played < limit && self.thompson_step()?.is_some() {
                    played += 1;
                }

                debug!(played, rounds_remaining = self.rounds_remaining(), "thompson sampling turn");
                Ok(self.snapshot())
            }
        }
    }
}
