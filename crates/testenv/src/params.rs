use std::collections::BTreeMap;

use atria_core::{
    BankParams, IncentivesParams, ParamSet, SlashingParams, StakingParams, WasmParams,
};

use crate::error::HarnessError;

/// Maps module names to a serialized prototype of their parameter-set
/// shape. Populated once at bootstrap, read-only afterwards; purely
/// additive, no removal. The registry itself validates nothing.
#[derive(Debug, Clone, Default)]
pub struct ParamTypeRegistry {
    prototypes: BTreeMap<String, serde_json::Value>,
}

impl ParamTypeRegistry {
    pub fn register<P: ParamSet>(&mut self, set: &P) -> Result<(), HarnessError> {
        self.prototypes
            .insert(set.module_name().to_owned(), serde_json::to_value(set)?);

        Ok(())
    }

    pub fn prototype(&self, module: &str) -> Option<&serde_json::Value> {
        self.prototypes.get(module)
    }

    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.prototypes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }
}

/// The parameter sets every bootstrapped environment knows about.
pub(crate) fn default_registry() -> Result<ParamTypeRegistry, HarnessError> {
    let mut registry = ParamTypeRegistry::default();

    registry.register(&BankParams::default())?;
    registry.register(&StakingParams::default())?;
    registry.register(&SlashingParams::default())?;
    registry.register(&IncentivesParams::default())?;
    registry.register(&WasmParams::default())?;

    Ok(registry)
}
