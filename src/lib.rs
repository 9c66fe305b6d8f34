//! # ab-bandit
//!
//! A Bernoulli multi-armed bandit simulator for demonstrating A/B/C testing:
//! an operator either picks arms by hand or hands control to Thompson
//! sampling, and the engine tracks what each strategy earns.
//!
//! ## Design Principles
//!
//! 1. **Explicit ownership**: A simulation is a value owned by whoever runs
//!    the session. There is no process-wide instance.
//!
//! 2. **Deterministic**: All randomness comes from seeded ChaCha streams
//!    owned by the engine. The same seed replays the same game.
//!
//! 3. **Conjugate updates**: Each arm keeps a Beta(1 + wins, 1 + losses)
//!    posterior, updated by one increment per trial.
//!
//! ## Modules
//!
//! - `core`: Arm IDs, per-arm storage, RNG, configuration, errors
//! - `engine`: Simulation state, Thompson sampling, trial execution,
//!   snapshots, turns and the shared handle

pub mod core;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    ArmConfig, ArmId, ArmMap,
    BanditError, BanditResult,
    BanditRng, BanditRngState,
    SimulationConfig,
};

pub use crate::engine::{
    ArmSnapshot, ArmState, BanditEngine, EngineCheckpoint, SharedEngine, Simulation,
    SimulationSnapshot, ThompsonSampling, Turn,
};
