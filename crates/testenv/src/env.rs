use std::path::{Path, PathBuf};

use atria_core::{
    BlockHeader, BlockParams, Chain, ConsensusParams, ExecutionContext, InitChainRequest,
    ValidatorKey,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{error::HarnessError, genesis, params, params::ParamTypeRegistry};

pub const CHAIN_ID: &str = "atria-1";
pub const BOND_DENOM: &str = "uatria";

/// Block-size ceiling large enough that no test fails on it.
const MAX_BLOCK_BYTES: i64 = 22_020_096;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Filesystem location handed to the application for local storage.
    pub node_home: PathBuf,

    pub chain_id: String,

    pub bond_denom: String,

    /// Block time of the genesis context. Defaults to the wall clock when
    /// unset; inject a fixed time for reproducible runs.
    pub genesis_time: Option<DateTime<Utc>>,

    pub max_block_bytes: i64,

    /// Negative disables the gas ceiling.
    pub max_block_gas: i64,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            node_home: PathBuf::from("data"),
            chain_id: CHAIN_ID.into(),
            bond_denom: BOND_DENOM.into(),
            genesis_time: None,
            max_block_bytes: MAX_BLOCK_BYTES,
            max_block_gas: -1,
        }
    }
}

impl HarnessConfig {
    pub fn new(node_home: impl Into<PathBuf>) -> Self {
        Self {
            node_home: node_home.into(),
            ..Default::default()
        }
    }

    pub fn with_genesis_time(mut self, genesis_time: DateTime<Utc>) -> Self {
        self.genesis_time = Some(genesis_time);
        self
    }

    pub(crate) fn consensus_params(&self) -> ConsensusParams {
        ConsensusParams {
            block: BlockParams {
                max_bytes: self.max_block_bytes,
                max_gas: self.max_block_gas,
            },
        }
    }
}

/// The root aggregate of the harness, exclusively owned by the test.
///
/// Holds the application under test, the current execution context
/// (replaced wholesale on every block advance), the private keys of
/// validators created through the harness, and the registered parameter
/// prototypes.
pub struct TestEnv<C: Chain> {
    pub(crate) app: C,
    pub(crate) ctx: ExecutionContext,
    pub(crate) param_types: ParamTypeRegistry,
    pub(crate) validator_keys: Vec<ValidatorKey>,
    pub(crate) config: HarnessConfig,
}

impl<C: Chain> TestEnv<C> {
    /// Boots the application from its default genesis.
    ///
    /// Overrides the wasm section with permissive deploy permissions,
    /// substitutes the configured bond denomination throughout the
    /// serialized payload, initializes the chain with permissive consensus
    /// ceilings and an empty validator-update set, establishes the
    /// height-0 context, and seeds signing info for every genesis
    /// validator. Any failure along the way aborts the bootstrap.
    pub fn bootstrap(app: C, config: HarnessConfig) -> Result<Self, HarnessError> {
        let (payload, staking_genesis) = genesis::build_genesis_payload(&app, &config)?;

        app.init_chain(InitChainRequest {
            validators: vec![],
            consensus_params: config.consensus_params(),
            app_state: payload,
            chain_id: config.chain_id.clone(),
        })?;

        let genesis_time = config.genesis_time.unwrap_or_else(Utc::now);

        let header = BlockHeader {
            chain_id: config.chain_id.clone(),
            height: 0,
            time: genesis_time,
        };
        let ctx = app.new_context(header);

        let env = Self {
            app,
            ctx,
            param_types: params::default_registry()?,
            validator_keys: Vec::new(),
            config,
        };

        for validator in &staking_genesis.validators {
            let address = validator.cons_address()?;
            env.seed_signing_info(&address)?;
        }

        info!(
            chain_id = %env.config.chain_id,
            genesis_validators = staking_genesis.validators.len(),
            %genesis_time,
            "chain bootstrapped"
        );

        Ok(env)
    }

    pub fn app(&self) -> &C {
        &self.app
    }

    /// Consumes the harness and returns the application.
    pub fn into_app(self) -> C {
        self.app
    }

    pub fn ctx(&self) -> &ExecutionContext {
        &self.ctx
    }

    pub fn param_types(&self) -> &ParamTypeRegistry {
        &self.param_types
    }

    /// Private keys of the validators created through `init_validator`,
    /// in creation order.
    pub fn validator_keys(&self) -> &[ValidatorKey] {
        &self.validator_keys
    }

    pub fn node_home(&self) -> &Path {
        &self.config.node_home
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }
}
