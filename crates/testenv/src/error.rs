use atria_core::{AddressError, AppError, ValAddress};
use thiserror::Error;

/// Anything that can go wrong inside the harness.
///
/// Two classes share this type: violated harness preconditions, and
/// failures surfaced by the application boundary. Both abort the current
/// test; the split only exists so expected-failure tests can assert which
/// side broke.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("validator not found: {0}")]
    ValidatorNotFound(ValAddress),

    #[error("no validators in the active set")]
    EmptyValidatorSet,

    #[error("unknown epoch identifier: {0}")]
    UnknownEpoch(String),

    #[error("time increase of {0}s exceeds the representable block-time range")]
    TimeIncreaseOutOfRange(u64),

    #[error("missing genesis section for module {0}")]
    MissingGenesisModule(String),

    #[error("{0} must not be empty")]
    EmptyResponse(&'static str),

    #[error("address derivation failed: {0}")]
    Address(#[from] AddressError),

    #[error("genesis encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("application error: {0}")]
    App(#[from] AppError),
}

impl HarnessError {
    /// True for violated harness preconditions, false for failures that
    /// originated inside the application or its serialization layer.
    pub fn is_precondition(&self) -> bool {
        !matches!(self, Self::App(_) | Self::Encoding(_))
    }
}
