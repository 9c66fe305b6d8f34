//! Thompson sampling behaviour over many draws.

use ab_bandit::{ArmId, BanditEngine, SimulationConfig, Turn};

#[test]
fn test_uniform_posteriors_select_evenly() {
    let mut engine = BanditEngine::new(SimulationConfig::default().with_seed(2024)).unwrap();
    let draws = 30_000;
    let mut counts = [0u32; 3];

    for _ in 0..draws {
        let arm = engine.select_arm_by_thompson_sampling().unwrap();
        counts[arm.index()] += 1;
    }

    // Each arm should land near 1/3; 3% is many standard deviations wide.
    for (i, &count) in counts.iter().enumerate() {
        let share = count as f64 / draws as f64;
        assert!((share - 1.0 / 3.0).abs() < 0.03, "arm {} share {}", i, share);
    }

    // Selection alone never plays anything.
    assert_eq!(engine.simulation().total_played(), 0);
}

#[test]
fn test_sampling_concentrates_on_best_arm() {
    let config = SimulationConfig::new()
        .with_arm("weak", 0.10)
        .with_arm("strong", 0.60)
        .with_arm("mid", 0.30)
        .with_trial_budget(3000)
        .with_seed(8);
    let mut engine = BanditEngine::new(config).unwrap();

    let snap = engine.play_turn(Turn::thompson_to_completion()).unwrap();

    let strong = snap.arm("strong").unwrap();
    assert!(
        strong.times_played > 2400,
        "best arm played only {} of 3000",
        strong.times_played
    );
    assert!((strong.observed_win_rate - 0.60).abs() < 0.05);
}

#[test]
fn test_sampling_beats_worst_manual_strategy() {
    let config = SimulationConfig::new()
        .with_arm("A", 0.05)
        .with_arm("B", 0.01)
        .with_arm("C", 0.15)
        .with_trial_budget(4000)
        .with_seed(3);

    let mut manual = BanditEngine::new(config.clone()).unwrap();
    let worst = manual.resolve_arm("B").unwrap();
    let manual_snap = manual.play_rounds(worst, 4000).unwrap();

    let mut sampled = BanditEngine::new(config).unwrap();
    let sampled_snap = sampled.play_turn(Turn::thompson_to_completion()).unwrap();

    assert!(sampled_snap.total_payout > manual_snap.total_payout);
}

#[test]
fn test_reselection_happens_every_trial() {
    let mut engine = BanditEngine::new(SimulationConfig::default().with_trial_budget(500).with_seed(4)).unwrap();

    let mut picks = Vec::new();
    while let Some(arm) = engine.thompson_step().unwrap() {
        picks.push(arm);
    }

    assert_eq!(picks.len(), 500);
    // With near-identical low win rates, sampling keeps switching arms.
    let switches = picks.windows(2).filter(|w| w[0] != w[1]).count();
    assert!(switches > 10, "only {} switches", switches);
    assert!(ArmId::all(3).all(|arm| picks.contains(&arm)));
}
