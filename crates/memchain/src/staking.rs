use atria_core::{
    AppError, BondStatus, ExecutionContext, MsgCreateValidator, MsgCreateValidatorResponse,
    StakingModule, StakingParams, ValAddress, Validator, NOT_BONDED_POOL,
};
use tracing::info;

use crate::state::SharedState;

#[derive(Clone)]
pub struct Staking {
    pub(crate) state: SharedState,
}

impl StakingModule for Staking {
    fn params(&self, _ctx: &ExecutionContext) -> Result<StakingParams, AppError> {
        let state = self.state.read().expect("chain state lock poisoned");
        state.ensure_initialized()?;

        Ok(state.staking_params.clone())
    }

    fn create_validator(
        &self,
        _ctx: &ExecutionContext,
        msg: MsgCreateValidator,
    ) -> Result<Option<MsgCreateValidatorResponse>, AppError> {
        let mut state = self.state.write().expect("chain state lock poisoned");
        state.ensure_initialized()?;

        if state
            .validators
            .iter()
            .any(|v| v.operator_address == msg.operator_address)
        {
            return Err(AppError::ValidatorExists(msg.operator_address));
        }

        // self-bond moves from the operator's account into the not-bonded
        // pool; creation never bonds directly
        let account = msg.operator_address.account()?;
        state.debit_account(&account, &msg.value)?;
        state.credit_module(NOT_BONDED_POOL, &msg.value)?;

        let validator = Validator {
            operator_address: msg.operator_address.clone(),
            consensus_pubkey: msg.pub_key,
            status: BondStatus::Unbonded,
            tokens: msg.value.amount,
            description: msg.description,
            commission: msg.commission,
            min_self_delegation: msg.min_self_delegation,
        };

        state.validators.push(validator);

        info!(operator = %msg.operator_address, self_bond = %msg.value, "validator created");

        Ok(Some(MsgCreateValidatorResponse {}))
    }

    fn validator(
        &self,
        _ctx: &ExecutionContext,
        operator: &ValAddress,
    ) -> Result<Option<Validator>, AppError> {
        let state = self.state.read().expect("chain state lock poisoned");
        state.ensure_initialized()?;

        let found = state
            .validators
            .iter()
            .find(|v| &v.operator_address == operator)
            .cloned();

        Ok(found)
    }

    fn set_validator(
        &self,
        _ctx: &ExecutionContext,
        validator: Validator,
    ) -> Result<(), AppError> {
        let mut state = self.state.write().expect("chain state lock poisoned");
        state.ensure_initialized()?;

        match state
            .validators
            .iter_mut()
            .find(|v| v.operator_address == validator.operator_address)
        {
            Some(existing) => *existing = validator,
            None => state.validators.push(validator),
        }

        Ok(())
    }

    fn all_validators(&self, _ctx: &ExecutionContext) -> Result<Vec<Validator>, AppError> {
        let state = self.state.read().expect("chain state lock poisoned");
        state.ensure_initialized()?;

        Ok(state.validators.clone())
    }
}
