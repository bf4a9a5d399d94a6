use atria_core::{
    Amount, BankModule, BondStatus, Chain, Coin, CommissionRates, ConsAddress, Description,
    MsgCreateValidator, StakingModule, ValAddress, ValidatorKey, BONDED_POOL, NOT_BONDED_POOL,
};
use tracing::info;

use crate::{env::TestEnv, error::HarnessError};

/// Self-bond amount every harness-created validator stakes.
pub const SELF_BOND_AMOUNT: Amount = 100;

impl<C: Chain> TestEnv<C> {
    /// Creates a fresh validator and forces it into the requested bond
    /// status.
    ///
    /// Generates a keypair, funds the operator account with the self-bond,
    /// submits the creation message (empty description, zero commission,
    /// minimum self-delegation of one), keeps the staking pools consistent
    /// with the requested status, and seeds the validator's signing info
    /// in the same step. Returns the private key and operator address.
    pub fn create_and_bond_validator(
        &mut self,
        status: BondStatus,
    ) -> Result<(ValidatorKey, ValAddress), HarnessError> {
        let key = ValidatorKey::generate();
        let pub_key = key.public_key();

        let operator = ValAddress::from_pub_key(&pub_key)?;
        let account = operator.account()?;

        let bond_denom = self.app.staking().params(&self.ctx)?.bond_denom;
        let self_bond = Coin::new(bond_denom, SELF_BOND_AMOUNT);

        self.app
            .bank()
            .fund_account(&self.ctx, &account, std::slice::from_ref(&self_bond))?;

        let msg = MsgCreateValidator {
            operator_address: operator.clone(),
            pub_key,
            value: self_bond.clone(),
            description: Description::default(),
            commission: CommissionRates::zero(),
            min_self_delegation: 1,
        };

        let response = self.app.staking().create_validator(&self.ctx, msg)?;
        if response.is_none() {
            return Err(HarnessError::EmptyResponse("create validator response"));
        }

        // creation leaves the stake in the not-bonded pool
        if status == BondStatus::Bonded {
            self.app.bank().send_from_module_to_module(
                &self.ctx,
                NOT_BONDED_POOL,
                BONDED_POOL,
                std::slice::from_ref(&self_bond),
            )?;
        }

        let validator = self
            .app
            .staking()
            .validator(&self.ctx, &operator)?
            .ok_or_else(|| HarnessError::ValidatorNotFound(operator.clone()))?;

        let validator = validator.update_status(status);
        let address = validator.cons_address()?;

        self.app.staking().set_validator(&self.ctx, validator)?;
        self.seed_signing_info(&address)?;

        info!(%operator, ?status, "validator created");

        Ok((key, operator))
    }

    /// Creates a bonded validator, retains its key, and funds its account
    /// with the maximal representable amount. Returns the consensus
    /// address.
    pub fn init_validator(&mut self) -> Result<ConsAddress, HarnessError> {
        let (key, operator) = self.create_and_bond_validator(BondStatus::Bonded)?;

        let validator = self
            .app
            .staking()
            .validator(&self.ctx, &operator)?
            .ok_or_else(|| HarnessError::ValidatorNotFound(operator.clone()))?;
        let address = validator.cons_address()?;

        self.validator_keys.push(key);
        self.fund_validator_account(&operator)?;

        Ok(address)
    }

    /// Funds the operator's account with the maximal representable token
    /// amount, so downstream scenarios never hit insufficient funds. A
    /// test-only relaxation, not an economic statement.
    pub fn fund_validator_account(&self, operator: &ValAddress) -> Result<(), HarnessError> {
        let account = operator.account()?;
        let bond_denom = self.app.staking().params(&self.ctx)?.bond_denom;

        self.app.bank().fund_account(
            &self.ctx,
            &account,
            &[Coin::new(bond_denom, Amount::MAX)],
        )?;

        Ok(())
    }

    /// Operator addresses of all known validators, in the application's
    /// own enumeration order.
    pub fn validator_addresses(&self) -> Result<Vec<String>, HarnessError> {
        let validators = self.app.staking().all_validators(&self.ctx)?;

        Ok(validators
            .into_iter()
            .map(|v| v.operator_address.into())
            .collect())
    }
}
