//! The bandit engine.
//!
//! ## Overview
//!
//! - `Simulation`: arms, counters and Beta posteriors for one bandit problem
//! - `ThompsonSampling`: one posterior draw per arm, argmax with ties to the
//!   earliest arm
//! - `BanditEngine`: owns a simulation and its random streams; plays trials
//! - `Turn`: manual batches vs. per-trial Thompson sampling
//! - `SharedEngine`: the same engine behind a mutex for concurrent callers
//!
//! ## Usage
//!
//! ```rust
//! use ab_bandit::engine::{BanditEngine, Turn};
//! use ab_bandit::SimulationConfig;
//!
//! let mut engine = BanditEngine::new(SimulationConfig::default()).unwrap();
//!
//! // An operator tries arm B for a while...
//! let b = engine.resolve_arm("B").unwrap();
//! engine.play_turn(Turn::Manual { arm: b, rounds: 500 }).unwrap();
//!
//! // ...then hands the rest of the budget to Thompson sampling.
//! let snapshot = engine.play_turn(Turn::thompson_to_completion()).unwrap();
//! assert_eq!(snapshot.rounds_remaining, 0);
//!
//! for arm in &snapshot.arms {
//!     println!("{}: {} played, {:.3} win rate", arm.label, arm.times_played, arm.observed_win_rate);
//! }
//! ```

pub mod bandit;
pub mod shared;
pub mod simulation;
pub mod snapshot;
pub mod thompson;
pub mod turn;

pub use bandit::{BanditEngine, EngineCheckpoint};
pub use shared::SharedEngine;
pub use simulation::{ArmState, Simulation};
pub use snapshot::{ArmSnapshot, SimulationSnapshot};
pub use thompson::ThompsonSampling;
pub use turn::Turn;
