use atria_core::{
    modules, Chain, StakingGenesis, WasmGenesis, WasmParams, DEFAULT_BOND_DENOM,
};

use crate::{env::HarnessConfig, error::HarnessError};

/// Assembles the serialized genesis payload for chain initialization.
///
/// Also returns the staking section so the bootstrap can seed signing
/// info for the genesis validators without re-parsing the payload.
pub(crate) fn build_genesis_payload<C: Chain>(
    app: &C,
    config: &HarnessConfig,
) -> Result<(Vec<u8>, StakingGenesis), HarnessError> {
    let mut genesis = app.default_genesis()?;

    // tests deploy contract code at will
    genesis.set_module(
        modules::WASM,
        &WasmGenesis {
            params: WasmParams::allow_everybody(),
        },
    )?;

    let staking: StakingGenesis = genesis
        .module(modules::STAKING)?
        .ok_or_else(|| HarnessError::MissingGenesisModule(modules::STAKING.into()))?;

    let payload = genesis.to_pretty_json()?;
    let payload = substitute_bond_denom(&payload, &config.bond_denom);

    Ok((payload, staking))
}

/// Replaces every occurrence of the quoted default bond denomination in
/// the serialized document with the configured one. Blunt, but every
/// module section ends up on the same denomination in one pass.
pub fn substitute_bond_denom(payload: &[u8], bond_denom: &str) -> Vec<u8> {
    let text = String::from_utf8_lossy(payload);

    let needle = format!("\"{DEFAULT_BOND_DENOM}\"");
    let replacement = format!("\"{bond_denom}\"");

    text.replace(&needle, &replacement).into_bytes()
}
