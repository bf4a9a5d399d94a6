use atria_core::{AccAddress, Amount, AppError, BankModule, Coin, ExecutionContext};
use tracing::debug;

use crate::state::SharedState;

#[derive(Clone)]
pub struct Bank {
    pub(crate) state: SharedState,
}

impl BankModule for Bank {
    fn fund_account(
        &self,
        _ctx: &ExecutionContext,
        address: &AccAddress,
        coins: &[Coin],
    ) -> Result<(), AppError> {
        let mut state = self.state.write().expect("chain state lock poisoned");
        state.ensure_initialized()?;

        for coin in coins {
            state.credit_account(address, coin)?;
        }

        debug!(account = %address, "account funded");

        Ok(())
    }

    fn balance(
        &self,
        _ctx: &ExecutionContext,
        address: &AccAddress,
        denom: &str,
    ) -> Result<Amount, AppError> {
        let state = self.state.read().expect("chain state lock poisoned");
        state.ensure_initialized()?;

        let amount = state
            .balances
            .get(address)
            .and_then(|coins| coins.get(denom))
            .copied()
            .unwrap_or_default();

        Ok(amount)
    }

    fn send_from_module_to_module(
        &self,
        _ctx: &ExecutionContext,
        from: &str,
        to: &str,
        coins: &[Coin],
    ) -> Result<(), AppError> {
        let mut state = self.state.write().expect("chain state lock poisoned");
        state.ensure_initialized()?;

        for coin in coins {
            state.debit_module(from, coin)?;
            state.credit_module(to, coin)?;
        }

        debug!(from, to, "module-to-module transfer");

        Ok(())
    }
}
