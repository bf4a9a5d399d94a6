use atria_core::{
    AppError, ConsAddress, ExecutionContext, SlashingModule, ValidatorSigningInfo,
};
use tracing::debug;

use crate::state::SharedState;

#[derive(Clone)]
pub struct Slashing {
    pub(crate) state: SharedState,
}

impl SlashingModule for Slashing {
    fn set_signing_info(
        &self,
        _ctx: &ExecutionContext,
        info: ValidatorSigningInfo,
    ) -> Result<(), AppError> {
        let mut state = self.state.write().expect("chain state lock poisoned");
        state.ensure_initialized()?;

        debug!(address = %info.address, start_height = info.start_height, "signing info set");

        state.signing_infos.insert(info.address.clone(), info);

        Ok(())
    }

    fn signing_info(
        &self,
        _ctx: &ExecutionContext,
        address: &ConsAddress,
    ) -> Result<Option<ValidatorSigningInfo>, AppError> {
        let state = self.state.read().expect("chain state lock poisoned");
        state.ensure_initialized()?;

        Ok(state.signing_infos.get(address).cloned())
    }
}
