mod address;
mod app;
mod bank;
mod context;
mod epoch;
mod genesis;
mod keys;
mod params;
mod slashing;
mod validator;
mod wasm;

/// The height of a block, starting at 0 for the genesis context
pub type BlockHeight = u64;

/// A token amount, large enough to hold the maximal test funding balance
pub type Amount = u128;

/// Consensus voting power attributed to a validator in a commit
pub type VotingPower = i64;

pub use address::*;
pub use app::*;
pub use bank::*;
pub use context::*;
pub use epoch::*;
pub use genesis::*;
pub use keys::*;
pub use params::*;
pub use slashing::*;
pub use validator::*;
pub use wasm::*;
