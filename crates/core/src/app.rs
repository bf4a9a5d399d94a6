use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::{
    AccAddress, AddressError, Amount, BlockHeader, BlockHeight, Coin, CommitInfo, ConsAddress,
    ConsensusParams, EpochInfo, ExecutionContext, GenesisState, MsgCreateValidator,
    MsgCreateValidatorResponse, PublicKey, StakingParams, ValAddress, Validator,
    ValidatorSigningInfo, VotingPower,
};

/// Any error surfaced across the application boundary. The harness treats
/// all of these as fatal for the current test.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("chain already initialized")]
    AlreadyInitialized,

    #[error("chain not initialized")]
    NotInitialized,

    #[error("malformed genesis: {0}")]
    Genesis(#[from] serde_json::Error),

    #[error("chain id mismatch: expected {expected}, got {got}")]
    ChainIdMismatch { expected: String, got: String },

    #[error("unexpected block height: expected {expected}, got {got}")]
    UnexpectedHeight {
        expected: BlockHeight,
        got: BlockHeight,
    },

    #[error("block time went backwards: last {last}, got {got}")]
    TimeWentBackwards {
        last: DateTime<Utc>,
        got: DateTime<Utc>,
    },

    #[error("insufficient funds in {account}: have {have}, need {need} {denom}")]
    InsufficientFunds {
        account: String,
        denom: String,
        have: Amount,
        need: Amount,
    },

    #[error("balance overflow for {account}")]
    BalanceOverflow { account: String },

    #[error("validator already exists: {0}")]
    ValidatorExists(ValAddress),

    #[error("unknown module account: {0}")]
    UnknownModuleAccount(String),

    #[error("epoch stream {0} has zero duration")]
    ZeroEpochDuration(String),

    #[error("address error: {0}")]
    Address(#[from] AddressError),
}

/// A validator-set change submitted at chain initialization. The harness
/// always passes an empty set since validators come from genesis state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorUpdate {
    pub pub_key: PublicKey,
    pub power: VotingPower,
}

#[derive(Debug, Clone)]
pub struct InitChainRequest {
    pub validators: Vec<ValidatorUpdate>,
    pub consensus_params: ConsensusParams,
    pub app_state: Vec<u8>,
    pub chain_id: String,
}

#[derive(Debug, Clone)]
pub struct BeginBlockRequest {
    pub header: BlockHeader,
    pub last_commit: CommitInfo,
}

pub trait BankModule {
    /// Mints the given coins into the account's balance.
    fn fund_account(
        &self,
        ctx: &ExecutionContext,
        address: &AccAddress,
        coins: &[Coin],
    ) -> Result<(), AppError>;

    fn balance(
        &self,
        ctx: &ExecutionContext,
        address: &AccAddress,
        denom: &str,
    ) -> Result<Amount, AppError>;

    fn send_from_module_to_module(
        &self,
        ctx: &ExecutionContext,
        from: &str,
        to: &str,
        coins: &[Coin],
    ) -> Result<(), AppError>;
}

pub trait StakingModule {
    fn params(&self, ctx: &ExecutionContext) -> Result<StakingParams, AppError>;

    /// Handles a validator-creation message. A `None` response with no
    /// error is a protocol violation the caller must treat as fatal.
    fn create_validator(
        &self,
        ctx: &ExecutionContext,
        msg: MsgCreateValidator,
    ) -> Result<Option<MsgCreateValidatorResponse>, AppError>;

    fn validator(
        &self,
        ctx: &ExecutionContext,
        operator: &ValAddress,
    ) -> Result<Option<Validator>, AppError>;

    fn set_validator(&self, ctx: &ExecutionContext, validator: Validator) -> Result<(), AppError>;

    /// All known validators, in the store's own enumeration order.
    fn all_validators(&self, ctx: &ExecutionContext) -> Result<Vec<Validator>, AppError>;
}

pub trait SlashingModule {
    /// Writes the record keyed by its consensus address, overwriting any
    /// previous one.
    fn set_signing_info(
        &self,
        ctx: &ExecutionContext,
        info: ValidatorSigningInfo,
    ) -> Result<(), AppError>;

    fn signing_info(
        &self,
        ctx: &ExecutionContext,
        address: &ConsAddress,
    ) -> Result<Option<ValidatorSigningInfo>, AppError>;
}

pub trait EpochsModule {
    /// The identifier of the epoch stream incentive distribution runs on.
    fn distr_epoch_identifier(&self, ctx: &ExecutionContext) -> Result<String, AppError>;

    fn epoch_info(
        &self,
        ctx: &ExecutionContext,
        identifier: &str,
    ) -> Result<Option<EpochInfo>, AppError>;
}

/// The application under test, seen strictly at its interface boundary.
///
/// Implementations own their storage and use interior mutability, so every
/// operation takes `&self`; a single `ExecutionContext` is threaded through
/// module calls the same way a block context would be in production.
pub trait Chain: Sized + 'static {
    type Bank: BankModule;
    type Staking: StakingModule;
    type Slashing: SlashingModule;
    type Epochs: EpochsModule;

    /// The application's default genesis document, including its
    /// pre-generated validator set.
    fn default_genesis(&self) -> Result<GenesisState, AppError>;

    fn init_chain(&self, request: InitChainRequest) -> Result<(), AppError>;

    fn begin_block(&self, request: BeginBlockRequest) -> Result<(), AppError>;

    /// A fresh execution context bound to the given header.
    fn new_context(&self, header: BlockHeader) -> ExecutionContext {
        ExecutionContext::new(header)
    }

    fn bank(&self) -> &Self::Bank;
    fn staking(&self) -> &Self::Staking;
    fn slashing(&self) -> &Self::Slashing;
    fn epochs(&self) -> &Self::Epochs;
}
