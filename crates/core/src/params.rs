use serde::Serialize;

use crate::{
    genesis::modules, BankParams, IncentivesParams, SlashingParams, StakingParams, WasmParams,
};

/// A module's parameter-set shape, registrable as a prototype for
/// downstream test utilities to validate or fuzz against.
pub trait ParamSet: Serialize {
    fn module_name(&self) -> &'static str;
}

impl ParamSet for BankParams {
    fn module_name(&self) -> &'static str {
        modules::BANK
    }
}

impl ParamSet for StakingParams {
    fn module_name(&self) -> &'static str {
        modules::STAKING
    }
}

impl ParamSet for SlashingParams {
    fn module_name(&self) -> &'static str {
        modules::SLASHING
    }
}

impl ParamSet for IncentivesParams {
    fn module_name(&self) -> &'static str {
        modules::INCENTIVES
    }
}

impl ParamSet for WasmParams {
    fn module_name(&self) -> &'static str {
        modules::WASM
    }
}
