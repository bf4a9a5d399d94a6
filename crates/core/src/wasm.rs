use serde::{Deserialize, Serialize};

use crate::AccAddress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessType {
    #[default]
    Nobody,
    Everybody,
    AnyOfAddresses,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessConfig {
    pub permission: AccessType,

    #[serde(default)]
    pub addresses: Vec<AccAddress>,
}

impl AccessConfig {
    pub fn everybody() -> Self {
        Self {
            permission: AccessType::Everybody,
            addresses: vec![],
        }
    }
}

/// Governance parameters for deploying contract code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WasmParams {
    pub code_upload_access: AccessConfig,
    pub instantiate_default_permission: AccessType,
}

impl WasmParams {
    /// Unrestricted deploy/instantiate permissions, suited for tests.
    pub fn allow_everybody() -> Self {
        Self {
            code_upload_access: AccessConfig::everybody(),
            instantiate_default_permission: AccessType::Everybody,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WasmGenesis {
    #[serde(default)]
    pub params: WasmParams,
}
