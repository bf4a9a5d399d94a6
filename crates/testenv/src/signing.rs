use atria_core::{Chain, ConsAddress, SlashingModule, StakingModule, ValidatorSigningInfo};

use crate::{env::TestEnv, error::HarnessError};

impl<C: Chain> TestEnv<C> {
    /// Seeds the default signing-info record for a validator: start height
    /// at the current context height, zero counters, Unix-epoch start
    /// time, not tombstoned.
    ///
    /// Calling this twice for the same address overwrites the record
    /// rather than erroring; validator creation invokes it exactly once.
    pub fn seed_signing_info(&self, address: &ConsAddress) -> Result<(), HarnessError> {
        let info = ValidatorSigningInfo::new(address.clone(), self.ctx.block_height());

        self.app.slashing().set_signing_info(&self.ctx, info)?;

        Ok(())
    }

    /// Seeds signing info for the first enumerated validator.
    pub fn seed_default_validator_signing_info(&self) -> Result<(), HarnessError> {
        let validators = self.app.staking().all_validators(&self.ctx)?;

        let first = validators.first().ok_or(HarnessError::EmptyValidatorSet)?;

        self.seed_signing_info(&first.cons_address()?)
    }
}
