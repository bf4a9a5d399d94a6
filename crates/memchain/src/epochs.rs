use atria_core::{AppError, EpochInfo, EpochsModule, ExecutionContext};

use crate::state::SharedState;

#[derive(Clone)]
pub struct Epochs {
    pub(crate) state: SharedState,
}

impl EpochsModule for Epochs {
    fn distr_epoch_identifier(&self, _ctx: &ExecutionContext) -> Result<String, AppError> {
        let state = self.state.read().expect("chain state lock poisoned");
        state.ensure_initialized()?;

        Ok(state.incentives_params.distr_epoch_identifier.clone())
    }

    fn epoch_info(
        &self,
        _ctx: &ExecutionContext,
        identifier: &str,
    ) -> Result<Option<EpochInfo>, AppError> {
        let state = self.state.read().expect("chain state lock poisoned");
        state.ensure_initialized()?;

        let found = state
            .epochs
            .iter()
            .find(|e| e.identifier == identifier)
            .cloned();

        Ok(found)
    }
}
