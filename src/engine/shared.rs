//! A lock-guarded engine handle for concurrent callers.
//!
//! Every call holds the lock for its whole duration, so readers never see a
//! trial half-applied. Thompson sampling turns lock once per trial: the
//! selection and the trial it picks are applied together, and other callers
//! may interleave between trials.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::{ArmId, BanditError, BanditResult, SimulationConfig};

use super::bandit::BanditEngine;
use super::snapshot::SimulationSnapshot;
use super::turn::Turn;

/// Cloneable handle to one engine shared between callers.
#[derive(Clone, Debug)]
pub struct SharedEngine {
    inner: Arc<Mutex<BanditEngine>>,
}

impl SharedEngine {
    pub fn new(engine: BanditEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn from_config(config: SimulationConfig) -> BanditResult<Self> {
        Ok(Self::new(BanditEngine::new(config)?))
    }

    pub fn resolve_arm(&self, label: &str) -> BanditResult<ArmId> {
        self.inner.lock().resolve_arm(label)
    }

    pub fn select_arm_by_thompson_sampling(&self) -> BanditResult<ArmId> {
        self.inner.lock().select_arm_by_thompson_sampling()
    }

    pub fn play_rounds(&self, arm: ArmId, rounds: u64) -> BanditResult<SimulationSnapshot> {
        self.inner.lock().play_rounds(arm, rounds)
    }

    /// Play one turn.
    ///
    /// Manual turns run under a single lock. Sampling turns take the lock
    /// per trial, and the returned snapshot is captured under the lock of
    /// the turn's last trial, so it never includes later trials by other
    /// callers.
    pub fn play_turn(&self, turn: Turn) -> BanditResult<SimulationSnapshot> {
        match turn {
            Turn::Manual { .. } => self.inner.lock().play_turn(turn),
            Turn::ThompsonSampling { rounds } => {
                if rounds == Some(0) {
                    return Err(BanditError::ZeroRounds);
                }

                let mut played = 0u64;
                loop {
                    let mut engine = self.inner.lock();
                    if engine.thompson_step()?.is_none() {
                        return Ok(engine.snapshot());
                    }
                    played += 1;
                    if rounds.map_or(false, |limit| played >= limit) {
                        return Ok(engine.snapshot());
                    }
                }
            }
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SimulationSnapshot {
        self.inner.lock().snapshot()
    }

    #[must_use]
    pub fn rounds_remaining(&self) -> u64 {
        self.inner.lock().rounds_remaining()
    }

    #[must_use]
    pub fn total_payout(&self) -> f64 {
        self.inner.lock().total_payout()
    }

    /// Run `f` against the engine under the lock.
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut BanditEngine) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
