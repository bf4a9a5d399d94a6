use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use atria_core::{
    AccAddress, Amount, AppError, BankParams, BlockHeader, Coin, ConsAddress, ConsensusParams,
    EpochInfo, IncentivesParams, SlashingParams, StakingParams, Validator, ValidatorSigningInfo,
    WasmParams, BONDED_POOL, NOT_BONDED_POOL,
};

pub(crate) type SharedState = Arc<RwLock<ChainState>>;

type Balances = BTreeMap<String, Amount>;

/// The whole application state behind a single lock. Good enough for a
/// single-threaded test application; never shared across instances.
#[derive(Default)]
pub(crate) struct ChainState {
    pub chain_id: Option<String>,
    pub consensus_params: Option<ConsensusParams>,
    pub last_header: Option<BlockHeader>,

    pub balances: BTreeMap<AccAddress, Balances>,
    pub module_accounts: BTreeMap<String, Balances>,
    pub bank_params: BankParams,

    /// Insertion order is the enumeration order callers observe.
    pub validators: Vec<Validator>,
    pub staking_params: StakingParams,

    pub signing_infos: BTreeMap<ConsAddress, ValidatorSigningInfo>,
    pub slashing_params: SlashingParams,

    pub epochs: Vec<EpochInfo>,
    pub incentives_params: IncentivesParams,

    pub wasm_params: WasmParams,
}

impl ChainState {
    pub fn ensure_initialized(&self) -> Result<(), AppError> {
        if self.chain_id.is_none() {
            return Err(AppError::NotInitialized);
        }

        Ok(())
    }

    pub fn credit_account(&mut self, address: &AccAddress, coin: &Coin) -> Result<(), AppError> {
        let balance = self
            .balances
            .entry(address.clone())
            .or_default()
            .entry(coin.denom.clone())
            .or_default();

        *balance = balance
            .checked_add(coin.amount)
            .ok_or_else(|| AppError::BalanceOverflow {
                account: address.to_string(),
            })?;

        Ok(())
    }

    pub fn debit_account(&mut self, address: &AccAddress, coin: &Coin) -> Result<(), AppError> {
        let have = self
            .balances
            .get(address)
            .and_then(|coins| coins.get(&coin.denom))
            .copied()
            .unwrap_or_default();

        if have < coin.amount {
            return Err(AppError::InsufficientFunds {
                account: address.to_string(),
                denom: coin.denom.clone(),
                have,
                need: coin.amount,
            });
        }

        self.balances
            .entry(address.clone())
            .or_default()
            .insert(coin.denom.clone(), have - coin.amount);

        Ok(())
    }

    pub fn credit_module(&mut self, name: &str, coin: &Coin) -> Result<(), AppError> {
        Self::check_module_account(name)?;

        let balance = self
            .module_accounts
            .entry(name.to_owned())
            .or_default()
            .entry(coin.denom.clone())
            .or_default();

        *balance = balance
            .checked_add(coin.amount)
            .ok_or_else(|| AppError::BalanceOverflow {
                account: name.to_owned(),
            })?;

        Ok(())
    }

    pub fn debit_module(&mut self, name: &str, coin: &Coin) -> Result<(), AppError> {
        Self::check_module_account(name)?;

        let have = self
            .module_accounts
            .get(name)
            .and_then(|coins| coins.get(&coin.denom))
            .copied()
            .unwrap_or_default();

        if have < coin.amount {
            return Err(AppError::InsufficientFunds {
                account: name.to_owned(),
                denom: coin.denom.clone(),
                have,
                need: coin.amount,
            });
        }

        self.module_accounts
            .entry(name.to_owned())
            .or_default()
            .insert(coin.denom.clone(), have - coin.amount);

        Ok(())
    }

    fn check_module_account(name: &str) -> Result<(), AppError> {
        if name != NOT_BONDED_POOL && name != BONDED_POOL {
            return Err(AppError::UnknownModuleAccount(name.to_owned()));
        }

        Ok(())
    }
}
