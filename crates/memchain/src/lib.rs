//! In-memory reference application for exercising the Atria test harness.
//!
//! Implements the `atria_core::Chain` boundary with plain in-memory data
//! structures. Every instance is fully isolated: no persistence, no shared
//! globals, state dropped with the value.

use std::path::PathBuf;

use atria_core::{
    modules, AccAddress, Amount, AppError, BankGenesis, Balance, BeginBlockRequest,
    BondStatus, Chain, Coin, CommissionRates, Description, EpochInfo, EpochsGenesis, GenesisState,
    IncentivesGenesis, InitChainRequest, SlashingGenesis, StakingGenesis, ValAddress, Validator,
    ValidatorKey, WasmGenesis, BONDED_POOL, DEFAULT_BOND_DENOM, NOT_BONDED_POOL,
};
use tracing::debug;

mod bank;
mod epochs;
mod slashing;
mod staking;
mod state;

pub use bank::Bank;
pub use epochs::Epochs;
pub use slashing::Slashing;
pub use staking::Staking;

use state::{ChainState, SharedState};

/// Self-bond of the pre-generated genesis validator.
pub const GENESIS_SELF_BOND: Amount = 1_000_000;

/// Initial spendable balance of the genesis operator account.
pub const GENESIS_ACCOUNT_BALANCE: Amount = 100_000_000;

pub struct MemChain {
    node_home: PathBuf,
    genesis_validator: Validator,
    genesis_account: AccAddress,
    state: SharedState,
    bank: Bank,
    staking: Staking,
    slashing: Slashing,
    epochs: Epochs,
}

impl MemChain {
    /// Opens a fresh, empty instance rooted at the given node home. The
    /// genesis validator keypair is generated here, so two instances never
    /// share identities.
    pub fn new(node_home: impl Into<PathBuf>) -> Result<Self, AppError> {
        let key = ValidatorKey::generate();
        let pub_key = key.public_key();

        let operator = ValAddress::from_pub_key(&pub_key)?;
        let genesis_account = operator.account()?;

        let genesis_validator = Validator {
            operator_address: operator,
            consensus_pubkey: pub_key,
            status: BondStatus::Bonded,
            tokens: GENESIS_SELF_BOND,
            description: Description {
                moniker: "genesis".into(),
                ..Default::default()
            },
            commission: CommissionRates::zero(),
            min_self_delegation: 1,
        };

        let state = SharedState::default();

        Ok(Self {
            node_home: node_home.into(),
            genesis_validator,
            genesis_account,
            bank: Bank {
                state: state.clone(),
            },
            staking: Staking {
                state: state.clone(),
            },
            slashing: Slashing {
                state: state.clone(),
            },
            epochs: Epochs {
                state: state.clone(),
            },
            state,
        })
    }

    pub fn node_home(&self) -> &std::path::Path {
        &self.node_home
    }

    fn roll_epochs(state: &mut ChainState, block_time: chrono::DateTime<chrono::Utc>) {
        for epoch in &mut state.epochs {
            match epoch.current_epoch_start_time {
                // first block starts the epoch stream
                None => {
                    epoch.current_epoch = 1;
                    epoch.current_epoch_start_time = Some(block_time);
                }
                Some(mut start) => {
                    while block_time >= start + epoch.duration() {
                        epoch.current_epoch += 1;
                        start += epoch.duration();
                    }
                    epoch.current_epoch_start_time = Some(start);
                }
            }
        }
    }
}

impl Chain for MemChain {
    type Bank = Bank;
    type Staking = Staking;
    type Slashing = Slashing;
    type Epochs = Epochs;

    fn default_genesis(&self) -> Result<GenesisState, AppError> {
        let mut genesis = GenesisState::default();

        genesis.set_module(
            modules::BANK,
            &BankGenesis {
                balances: vec![Balance {
                    address: self.genesis_account.clone(),
                    coins: vec![Coin::new(DEFAULT_BOND_DENOM, GENESIS_ACCOUNT_BALANCE)],
                }],
                ..Default::default()
            },
        )?;

        genesis.set_module(
            modules::STAKING,
            &StakingGenesis {
                validators: vec![self.genesis_validator.clone()],
                ..Default::default()
            },
        )?;

        genesis.set_module(modules::SLASHING, &SlashingGenesis::default())?;

        genesis.set_module(
            modules::EPOCHS,
            &EpochsGenesis {
                epochs: vec![
                    EpochInfo::new("day", 60 * 60 * 24),
                    EpochInfo::new("week", 60 * 60 * 24 * 7),
                ],
            },
        )?;

        genesis.set_module(modules::INCENTIVES, &IncentivesGenesis::default())?;
        genesis.set_module(modules::WASM, &WasmGenesis::default())?;

        Ok(genesis)
    }

    fn init_chain(&self, request: InitChainRequest) -> Result<(), AppError> {
        let mut state = self.state.write().expect("chain state lock poisoned");

        if state.chain_id.is_some() {
            return Err(AppError::AlreadyInitialized);
        }

        let genesis = GenesisState::from_json(&request.app_state)?;

        let bank: BankGenesis = genesis.module(modules::BANK)?.unwrap_or_default();
        let staking: StakingGenesis = genesis.module(modules::STAKING)?.unwrap_or_default();
        let slashing: SlashingGenesis = genesis.module(modules::SLASHING)?.unwrap_or_default();
        let epochs: EpochsGenesis = genesis.module(modules::EPOCHS)?.unwrap_or_default();
        let incentives: IncentivesGenesis =
            genesis.module(modules::INCENTIVES)?.unwrap_or_default();
        let wasm: WasmGenesis = genesis.module(modules::WASM)?.unwrap_or_default();

        state.bank_params = bank.params;
        for balance in bank.balances {
            for coin in &balance.coins {
                state.credit_account(&balance.address, coin)?;
            }
        }

        state.staking_params = staking.params;
        for validator in staking.validators {
            let pool = match validator.status {
                BondStatus::Bonded => BONDED_POOL,
                _ => NOT_BONDED_POOL,
            };
            let stake = Coin::new(state.staking_params.bond_denom.clone(), validator.tokens);
            state.credit_module(pool, &stake)?;
            state.validators.push(validator);
        }

        state.slashing_params = slashing.params;
        for info in slashing.signing_infos {
            state.signing_infos.insert(info.address.clone(), info);
        }

        // zero-duration streams would never terminate the rollover loop
        for epoch in &epochs.epochs {
            if epoch.duration_secs == 0 {
                return Err(AppError::ZeroEpochDuration(epoch.identifier.clone()));
            }
        }

        state.epochs = epochs.epochs;
        state.incentives_params = incentives.params;
        state.wasm_params = wasm.params;

        state.consensus_params = Some(request.consensus_params);
        state.chain_id = Some(request.chain_id);

        debug!(
            validators = state.validators.len(),
            epochs = state.epochs.len(),
            "chain initialized"
        );

        Ok(())
    }

    fn begin_block(&self, request: BeginBlockRequest) -> Result<(), AppError> {
        let mut state = self.state.write().expect("chain state lock poisoned");
        state.ensure_initialized()?;

        let chain_id = state.chain_id.clone().unwrap_or_default();
        if request.header.chain_id != chain_id {
            return Err(AppError::ChainIdMismatch {
                expected: chain_id,
                got: request.header.chain_id,
            });
        }

        let expected = state.last_header.as_ref().map(|h| h.height + 1).unwrap_or(1);
        if request.header.height != expected {
            return Err(AppError::UnexpectedHeight {
                expected,
                got: request.header.height,
            });
        }

        if let Some(last) = &state.last_header {
            if request.header.time < last.time {
                return Err(AppError::TimeWentBackwards {
                    last: last.time,
                    got: request.header.time,
                });
            }
        }

        Self::roll_epochs(&mut state, request.header.time);

        for vote in &request.last_commit.votes {
            if let Some(info) = state.signing_infos.get_mut(&vote.validator) {
                if vote.signed_last_block {
                    info.index_offset += 1;
                } else {
                    info.missed_blocks_counter += 1;
                }
            }
        }

        debug!(
            height = request.header.height,
            time = %request.header.time,
            "block began"
        );

        state.last_header = Some(request.header);

        Ok(())
    }

    fn bank(&self) -> &Self::Bank {
        &self.bank
    }

    fn staking(&self) -> &Self::Staking {
        &self.staking
    }

    fn slashing(&self) -> &Self::Slashing {
        &self.slashing
    }

    fn epochs(&self) -> &Self::Epochs {
        &self.epochs
    }
}
