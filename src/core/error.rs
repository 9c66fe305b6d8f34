//! Error types for the bandit engine.
//!
//! Budget exhaustion is not an error: it is reported through
//! `rounds_remaining == 0` in every snapshot.

use thiserror::Error;

use super::ArmId;

pub type BanditResult<T> = Result<T, BanditError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BanditError {
    #[error("Unknown arm label: {0:?}")]
    UnknownArm(String),

    #[error("{arm} is not configured (simulation has {arm_count} arms)")]
    ArmOutOfRange { arm: ArmId, arm_count: usize },

    #[error("Round count must be at least 1")]
    ZeroRounds,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Posterior sampling error: {0}")]
    Sampling(String),
}

impl BanditError {
    /// Whether this error rejects a caller-supplied argument.
    ///
    /// These errors are raised before any state is touched.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::UnknownArm(_) | Self::ArmOutOfRange { .. } | Self::ZeroRounds
        )
    }
}
