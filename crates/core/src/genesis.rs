use std::collections::BTreeMap;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// The bond denomination the application's default genesis is written in.
/// The harness substitutes this for its configured denomination before
/// initializing the chain.
pub const DEFAULT_BOND_DENOM: &str = "stake";

/// Well-known module names used as keys in the genesis document.
pub mod modules {
    pub const BANK: &str = "bank";
    pub const STAKING: &str = "staking";
    pub const SLASHING: &str = "slashing";
    pub const EPOCHS: &str = "epochs";
    pub const INCENTIVES: &str = "incentives";
    pub const WASM: &str = "wasm";
}

/// The application's complete initial state, keyed by module name. Each
/// value is that module's genesis object, opaque to everything but the
/// module's own loader.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenesisState(BTreeMap<String, serde_json::Value>);

impl std::ops::Deref for GenesisState {
    type Target = BTreeMap<String, serde_json::Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::DerefMut for GenesisState {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl GenesisState {
    pub fn set_module<T: Serialize>(
        &mut self,
        name: &str,
        state: &T,
    ) -> Result<(), serde_json::Error> {
        self.0.insert(name.to_owned(), serde_json::to_value(state)?);
        Ok(())
    }

    pub fn module<T: DeserializeOwned>(
        &self,
        name: &str,
    ) -> Result<Option<T>, serde_json::Error> {
        self.0
            .get(name)
            .map(|value| serde_json::from_value(value.clone()))
            .transpose()
    }

    /// Serializes the full document, pretty-printed for readability.
    pub fn to_pretty_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec_pretty(self)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
