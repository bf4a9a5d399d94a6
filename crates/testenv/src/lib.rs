//! Deterministic test harness for a block-structured Atria application.
//!
//! The harness bootstraps an isolated application instance from a
//! reproducible genesis, manages the validator set's lifecycle, and
//! advances the chain one block at a time under test control, including an
//! epoch-aware "skip to the next boundary" mode.
//!
//! Single-threaded by design: a [`TestEnv`] exclusively owns its
//! application and execution context, and must not be shared across
//! threads mid-operation.

mod blocks;
mod env;
mod error;
mod genesis;
mod params;
mod signing;
mod validators;

pub use blocks::PROPOSER_VOTING_POWER;
pub use env::{HarnessConfig, TestEnv, BOND_DENOM, CHAIN_ID};
pub use error::HarnessError;
pub use genesis::substitute_bond_denom;
pub use params::ParamTypeRegistry;
pub use validators::SELF_BOND_AMOUNT;
