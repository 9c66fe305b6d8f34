//! Thompson sampling arm selection.
//!
//! Draws one sample from each arm's Beta posterior and picks the arm with
//! the largest sample. Arms are visited in configuration order and only a
//! strictly larger sample replaces the current best, so ties go to the
//! earliest arm and a seeded RNG always reproduces the same choice.

use smallvec::SmallVec;
use tracing::trace;

use crate::core::{ArmId, ArmMap, BanditResult, BanditRng};

use super::simulation::ArmState;

/// Thompson sampling selection policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThompsonSampling;

impl ThompsonSampling {
    /// Select an arm by sampling every posterior once.
    ///
    /// Consumes one Beta draw per arm from `rng`; never mutates the arms.
    pub fn select(&self, arms: &ArmMap<ArmState>, rng: &mut BanditRng) -> BanditResult<ArmId> {
        let mut samples: SmallVec<[(ArmId, f64); 4]> = SmallVec::with_capacity(arms.arm_count());
        for (id, arm) in arms.iter() {
            let sample = rng.sample_beta(arm.posterior_alpha(), arm.posterior_beta())?;
            trace!(arm = arm.label(), sample, "posterior sample");
            samples.push((id, sample));
        }

        Ok(argmax_first(samples))
    }
}

/// Arm with the largest sample; the earliest arm wins a tie.
///
/// An empty sequence yields `ArmId(0)`.
pub(crate) fn argmax_first(samples: impl IntoIterator<Item = (ArmId, f64)>) -> ArmId {
    let mut best = ArmId::new(0);
    let mut best_sample = f64::NEG_INFINITY;

    for (id, sample) in samples {
        if sample > best_sample {
            best = id;
            best_sample = sample;
        }
    }

    best
}
