//! Core types: arm identifiers, per-arm storage, RNG, configuration, errors.
//!
//! Nothing in this module knows about selection policies; the engine builds
//! on top of it.

pub mod arm;
pub mod config;
pub mod error;
pub mod rng;

pub use arm::{ArmId, ArmMap};
pub use config::{ArmConfig, SimulationConfig, DEFAULT_REWARD_PER_WIN, DEFAULT_SEED, DEFAULT_TRIAL_BUDGET};
pub use error::{BanditError, BanditResult};
pub use rng::{BanditRng, BanditRngState};
