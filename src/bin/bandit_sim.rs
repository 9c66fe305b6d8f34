//! Headless driver for the bandit engine.
//!
//! Plays a sequence of turns against one simulation and prints the final
//! snapshot as JSON.
//!
//! ```text
//! bandit-sim --turn A:300 --turn C:300 --turn thompson
//! bandit-sim --arm X=0.1 --arm Y=0.2 --budget 1000 --seed 7 --turn thompson:250
//! ```

use std::path::PathBuf;

use ab_bandit::{BanditEngine, SimulationConfig, Turn};
use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "bandit-sim")]
#[command(about = "Simulate A/B/C testing with manual arm picks or Thompson sampling")]
#[command(version)]
struct Cli {
    /// JSON simulation config (defaults to arms A/B/C)
    #[arg(long, env = "BANDIT_SIM_CONFIG")]
    config: Option<PathBuf>,

    /// Replace the configured arms, as LABEL=PROBABILITY (repeatable)
    #[arg(long = "arm", value_name = "LABEL=P")]
    arms: Vec<String>,

    /// Trial budget (overrides config)
    #[arg(long)]
    budget: Option<u64>,

    /// Reward per win (overrides config)
    #[arg(long)]
    reward: Option<f64>,

    /// RNG seed (overrides config)
    #[arg(long, env = "BANDIT_SIM_SEED")]
    seed: Option<u64>,

    /// Turn to play, as LABEL:ROUNDS, `thompson` or `thompson:ROUNDS` (repeatable)
    #[arg(long = "turn", value_name = "TURN")]
    turns: Vec<String>,
}

fn load_config(cli: &Cli) -> anyhow::Result<SimulationConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?
        }
        None => SimulationConfig::default(),
    };

    if !cli.arms.is_empty() {
        config.arms.clear();
        for spec in &cli.arms {
            let Some((label, p)) = spec.split_once('=') else {
                bail!("arm {spec:?} is not LABEL=PROBABILITY");
            };
            let p: f64 = p.parse().with_context(|| format!("arm {spec:?} probability"))?;
            config = config.with_arm(label, p);
        }
    }
    if let Some(budget) = cli.budget {
        config = config.with_trial_budget(budget);
    }
    if let Some(reward) = cli.reward {
        config = config.with_reward_per_win(reward);
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    Ok(config)
}

fn parse_turn(engine: &BanditEngine, spec: &str) -> anyhow::Result<Turn> {
    let (head, rounds) = match spec.split_once(':') {
        Some((head, rounds)) => {
            let rounds: u64 = rounds.parse().with_context(|| format!("turn {spec:?} rounds"))?;
            (head, Some(rounds))
        }
        None => (spec, None),
    };

    if head.eq_ignore_ascii_case("thompson") {
        return Ok(Turn::ThompsonSampling { rounds });
    }

    let arm = engine.resolve_arm(head)?;
    Ok(Turn::Manual { arm, rounds: rounds.unwrap_or(1) })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ab_bandit=info,bandit_sim=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    info!(
        arms = config.arms.len(),
        budget = config.trial_budget,
        seed = config.seed,
        "starting simulation"
    );

    let mut engine = BanditEngine::new(config)?;

    let turns = if cli.turns.is_empty() {
        vec![Turn::thompson_to_completion()]
    } else {
        cli.turns
            .iter()
            .map(|spec| parse_turn(&engine, spec))
            .collect::<anyhow::Result<Vec<_>>>()?
    };

    let mut snapshot = engine.snapshot();
    for turn in turns {
        if snapshot.is_exhausted() {
            info!(?turn, "budget exhausted, skipping remaining turns");
            break;
        }
        snapshot = engine.play_turn(turn)?;
        info!(
            ?turn,
            total_played = snapshot.total_played,
            total_payout = snapshot.total_payout,
            rounds_remaining = snapshot.rounds_remaining,
            "turn complete"
        );
    }

    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
