//! The bandit engine: selection, trial execution and reporting.

use rustc_hash::FxHashMap;
use tracing::{debug, info, trace, warn};

use crate::core::{ArmId, BanditError, BanditResult, BanditRng, BanditRngState, SimulationConfig};

use super::simulation::{ArmState, Simulation};
use super::snapshot::SimulationSnapshot;
use super::thompson::ThompsonSampling;

/// Everything needed to resume an engine mid-game: the simulation and the
/// position of both random streams.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineCheckpoint {
    simulation: Simulation,
    reward_rng: BanditRngState,
    policy_rng: BanditRngState,
}

impl EngineCheckpoint {
    #[must_use]
    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }
}

fn label_index(simulation: &Simulation) -> FxHashMap<String, ArmId> {
    simulation
        .arms()
        .iter()
        .map(|(id, arm)| (arm.label().to_owned(), id))
        .collect()
}

/// A seeded, single-owner bandit simulation.
///
/// Owns the simulation and two independent random streams: one for the
/// hidden Bernoulli rewards and one for Thompson sampling. Drawing posterior
/// samples therefore never shifts the reward sequence.
///
/// ```
/// use ab_bandit::{BanditEngine, SimulationConfig};
///
/// let mut engine = BanditEngine::new(SimulationConfig::default().with_trial_budget(100)).unwrap();
///
/// let a = engine.resolve_arm("A").unwrap();
/// let snapshot = engine.play_rounds(a, 30).unwrap();
/// assert_eq!(snapshot.rounds_remaining, 70);
///
/// let pick = engine.select_arm_by_thompson_sampling().unwrap();
/// engine.play_rounds(pick, 1).unwrap();
/// assert_eq!(engine.rounds_remaining(), 69);
/// ```
#[derive(Clone, Debug)]
pub struct BanditEngine {
    simulation: Simulation,
    labels: FxHashMap<String, ArmId>,
    reward_rng: BanditRng,
    policy_rng: BanditRng,
    policy: ThompsonSampling,
}

impl BanditEngine {
    /// Build an engine from a configuration, seeding both streams from
    /// `config.seed`.
    pub fn new(config: SimulationConfig) -> BanditResult<Self> {
        let simulation = Simulation::from_config(&config)?;
        let labels = label_index(&simulation);
        let root = BanditRng::new(config.seed);

        debug!(
            arms = simulation.arm_count(),
            trial_budget = simulation.trial_budget(),
            reward_per_win = simulation.reward_per_win(),
            seed = config.seed,
            "bandit engine created"
        );

        Ok(Self {
            simulation,
            labels,
            reward_rng: root.stream(BanditRng::REWARD_STREAM),
            policy_rng: root.stream(BanditRng::POLICY_STREAM),
            policy: ThompsonSampling,
        })
    }

    /// Capture the simulation and both random streams.
    #[must_use]
    pub fn checkpoint(&self) -> EngineCheckpoint {
        EngineCheckpoint {
            simulation: self.simulation.clone(),
            reward_rng: self.reward_rng.state(),
            policy_rng: self.policy_rng.state(),
        }
    }

    /// Resume from a checkpoint.
    ///
    /// The resumed engine makes exactly the selections and draws exactly the
    /// outcomes the checkpointed engine would have.
    #[must_use]
    pub fn from_checkpoint(checkpoint: &EngineCheckpoint) -> Self {
        debug!(
            total_played = checkpoint.simulation.total_played(),
            rounds_remaining = checkpoint.simulation.rounds_remaining(),
            "bandit engine restored"
        );

        Self {
            labels: label_index(&checkpoint.simulation),
            simulation: checkpoint.simulation.clone(),
            reward_rng: BanditRng::from_state(&checkpoint.reward_rng),
            policy_rng: BanditRng::from_state(&checkpoint.policy_rng),
            policy: ThompsonSampling,
        }
    }

    /// Look up an arm by its configured label.
    pub fn resolve_arm(&self, label: &str) -> BanditResult<ArmId> {
        self.labels.get(label).copied().ok_or_else(|| {
            warn!(label, "unknown arm label");
            BanditError::UnknownArm(label.to_owned())
        })
    }

    /// Pick the arm to play next by Thompson sampling.
    ///
    /// Consumes randomness from the sampling stream only; the simulation is
    /// not modified.
    pub fn select_arm_by_thompson_sampling(&mut self) -> BanditResult<ArmId> {
        let arm = self.policy.select(self.simulation.arms(), &mut self.policy_rng)?;
        trace!(%arm, "thompson sampling selected arm");
        Ok(arm)
    }

    /// Play up to `rounds` trials on `arm`.
    ///
    /// Stops early, without error, when the trial budget runs out. Rejects
    /// an unknown arm or a zero round count before touching any state.
    pub fn play_rounds(&mut self, arm: ArmId, rounds: u64) -> BanditResult<SimulationSnapshot> {
        self.check_arm(arm)?;
        if rounds == 0 {
            warn!(%arm, "rejected zero round count");
            return Err(BanditError::ZeroRounds);
        }

        let mut played = 0u64;
        while played < rounds && !self.simulation.is_exhausted() {
            self.play_one(arm);
            played += 1;
        }

        debug!(
            %arm,
            requested = rounds,
            played,
            rounds_remaining = self.simulation.rounds_remaining(),
            "played rounds"
        );

        if played > 0 && self.simulation.is_exhausted() {
            info!(
                total_played = self.simulation.total_played(),
                total_payout = self.simulation.total_payout(),
                "trial budget exhausted"
            );
        }

        Ok(self.snapshot())
    }

    /// Select one arm by Thompson sampling and play exactly one trial on it.
    ///
    /// Returns `None` without drawing anything once the budget is spent.
    pub fn thompson_step(&mut self) -> BanditResult<Option<ArmId>> {
        if self.simulation.is_exhausted() {
            return Ok(None);
        }
        let arm = self.select_arm_by_thompson_sampling()?;
        self.play_rounds(arm, 1)?;
        Ok(Some(arm))
    }

    fn check_arm(&self, arm: ArmId) -> BanditResult<()> {
        if self.simulation.arms().contains(arm) {
            Ok(())
        } else {
            warn!(%arm, "rejected unconfigured arm");
            Err(BanditError::ArmOutOfRange {
                arm,
                arm_count: self.simulation.arm_count(),
            })
        }
    }

    fn play_one(&mut self, arm: ArmId) {
        let u = self.reward_rng.next_unit();
        let won = u < self.simulation.arms()[arm].true_win_probability();
        self.simulation.record(arm, won);
        trace!(%arm, u, won, "trial");
    }

    /// Capture the current state for reporting.
    #[must_use]
    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot::capture(&self.simulation)
    }

    #[must_use]
    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    #[must_use]
    pub fn arm(&self, arm: ArmId) -> Option<&ArmState> {
        self.simulation.arm(arm)
    }

    #[must_use]
    pub fn rounds_remaining(&self) -> u64 {
        self.simulation.rounds_remaining()
    }

    #[must_use]
    pub fn total_payout(&self) -> f64 {
        self.simulation.total_payout()
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.simulation.is_exhausted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rigged(budget: u64) -> BanditEngine {
        let config = SimulationConfig::new()
            .with_arm("A", 1.0)
            .with_arm("B", 0.0)
            .with_arm("C", 0.0)
            .with_trial_budget(budget);
        BanditEngine::new(config).unwrap()
    }

    #[test]
    fn test_resolve_arm() {
        let engine = rigged(10);
        assert_eq!(engine.resolve_arm("A"), Ok(ArmId::new(0)));
        assert_eq!(engine.resolve_arm("C"), Ok(ArmId::new(2)));
        assert_eq!(engine.resolve_arm("Z"), Err(BanditError::UnknownArm("Z".into())));
    }

    #[test]
    fn test_certain_win_and_certain_loss() {
        let mut engine = rigged(20);

        let snap = engine.play_rounds(ArmId::new(0), 5).unwrap();
        assert_eq!(snap.arms[0].wins, 5);

        let snap = engine.play_rounds(ArmId::new(1), 5).unwrap();
        assert_eq!(snap.arms[1].times_played, 5);
        assert_eq!(snap.arms[1].wins, 0);
        assert_eq!(snap.arms[1].posterior_beta, 6.0);
        assert_eq!(snap.rounds_remaining, 10);
    }

    #[test]
    fn test_zero_rounds_rejected_without_mutation() {
        let mut engine = rigged(10);
        let before = engine.snapshot();

        let err = engine.play_rounds(ArmId::new(0), 0).unwrap_err();
        assert_eq!(err, BanditError::ZeroRounds);
        assert!(err.is_invalid_argument());
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_out_of_range_arm_rejected() {
        let mut engine = rigged(10);
        let err = engine.play_rounds(ArmId::new(3), 1).unwrap_err();

        assert_eq!(err, BanditError::ArmOutOfRange { arm: ArmId::new(3), arm_count: 3 });
        assert_eq!(engine.simulation().total_played(), 0);
    }

    #[test]
    fn test_thompson_step_stops_at_budget() {
        let mut engine = rigged(3);

        for _ in 0..3 {
            assert!(engine.thompson_step().unwrap().is_some());
        }
        assert_eq!(engine.thompson_step().unwrap(), None);
        assert_eq!(engine.simulation().total_played(), 3);
    }

    #[test]
    fn test_checkpoint_replays_from_midpoint() {
        let config = SimulationConfig::default().with_trial_budget(400).with_seed(21);
        let mut engine = BanditEngine::new(config).unwrap();

        let a = engine.resolve_arm("A").unwrap();
        engine.play_rounds(a, 50).unwrap();
        for _ in 0..150 {
            engine.thompson_step().unwrap();
        }

        let checkpoint = engine.checkpoint();
        assert_eq!(checkpoint.simulation().total_played(), 200);

        let mut original_picks = Vec::new();
        while let Some(arm) = engine.thompson_step().unwrap() {
            original_picks.push(arm);
        }

        let mut resumed = BanditEngine::from_checkpoint(&checkpoint);
        assert_eq!(resumed.rounds_remaining(), 200);
        assert_eq!(resumed.resolve_arm("C"), Ok(ArmId::new(2)));

        let mut resumed_picks = Vec::new();
        while let Some(arm) = resumed.thompson_step().unwrap() {
            resumed_picks.push(arm);
        }

        assert_eq!(original_picks.len(), 200);
        assert_eq!(resumed_picks, original_picks);
        assert_eq!(resumed.snapshot(), engine.snapshot());
    }

    #[test]
    fn test_checkpoint_is_unaffected_by_later_play() {
        let mut engine = rigged(10);
        let checkpoint = engine.checkpoint();

        engine.play_rounds(ArmId::new(0), 10).unwrap();

        let resumed = BanditEngine::from_checkpoint(&checkpoint);
        assert_eq!(resumed.simulation().total_played(), 0);
        assert_eq!(resumed.rounds_remaining(), 10);
    }

    #[test]
    fn test_selection_does_not_shift_rewards() {
        let config = SimulationConfig::default().with_seed(5);
        let mut plain = BanditEngine::new(config.clone()).unwrap();
        let mut sampled = BanditEngine::new(config).unwrap();

        for _ in 0..25 {
            sampled.select_arm_by_thompson_sampling().unwrap();
        }

        let c = plain.resolve_arm("C").unwrap();
        assert_eq!(plain.play_rounds(c, 500).unwrap(), sampled.play_rounds(c, 500).unwrap());
    }
}
