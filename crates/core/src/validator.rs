use serde::{Deserialize, Serialize};

use crate::{
    AddressError, Amount, Coin, ConsAddress, PublicKey, ValAddress, DEFAULT_BOND_DENOM,
};

/// Module account holding stake that does not count toward voting power.
pub const NOT_BONDED_POOL: &str = "not_bonded_tokens_pool";

/// Module account holding actively bonded stake.
pub const BONDED_POOL: &str = "bonded_tokens_pool";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BondStatus {
    #[default]
    Unbonded,
    Unbonding,
    Bonded,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    #[serde(default)]
    pub moniker: String,

    #[serde(default)]
    pub identity: String,

    #[serde(default)]
    pub website: String,

    #[serde(default)]
    pub details: String,
}

/// Commission rates expressed as decimal strings, matching the genesis
/// wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionRates {
    pub rate: String,
    pub max_rate: String,
    pub max_change_rate: String,
}

impl CommissionRates {
    pub fn zero() -> Self {
        Self {
            rate: "0".into(),
            max_rate: "0".into(),
            max_change_rate: "0".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    pub operator_address: ValAddress,
    pub consensus_pubkey: PublicKey,
    pub status: BondStatus,

    #[serde(with = "crate::bank::amount_serde")]
    pub tokens: Amount,

    #[serde(default)]
    pub description: Description,

    pub commission: CommissionRates,

    #[serde(with = "crate::bank::amount_serde")]
    pub min_self_delegation: Amount,
}

impl Validator {
    /// The consensus address the validator signs blocks under.
    pub fn cons_address(&self) -> Result<ConsAddress, AddressError> {
        ConsAddress::from_pub_key(&self.consensus_pubkey)
    }

    pub fn update_status(mut self, status: BondStatus) -> Self {
        self.status = status;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingParams {
    pub unbonding_time_secs: u64,
    pub max_validators: u32,
    pub bond_denom: String,
}

impl Default for StakingParams {
    fn default() -> Self {
        Self {
            // two weeks
            unbonding_time_secs: 60 * 60 * 24 * 14,
            max_validators: 100,
            bond_denom: DEFAULT_BOND_DENOM.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StakingGenesis {
    #[serde(default)]
    pub params: StakingParams,

    #[serde(default)]
    pub validators: Vec<Validator>,
}

#[derive(Debug, Clone)]
pub struct MsgCreateValidator {
    pub operator_address: ValAddress,
    pub pub_key: PublicKey,
    pub value: Coin,
    pub description: Description,
    pub commission: CommissionRates,
    pub min_self_delegation: Amount,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MsgCreateValidatorResponse {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidatorKey;

    fn test_validator() -> Validator {
        let pub_key = ValidatorKey::from_seed([5u8; 32]).public_key();

        Validator {
            operator_address: ValAddress::from_pub_key(&pub_key).unwrap(),
            consensus_pubkey: pub_key,
            status: BondStatus::Unbonded,
            tokens: 100,
            description: Description::default(),
            commission: CommissionRates::zero(),
            min_self_delegation: 1,
        }
    }

    #[test]
    fn update_status_replaces_only_the_status() {
        let validator = test_validator();
        let operator = validator.operator_address.clone();

        let bonded = validator.update_status(BondStatus::Bonded);

        assert_eq!(bonded.status, BondStatus::Bonded);
        assert_eq!(bonded.operator_address, operator);
        assert_eq!(bonded.tokens, 100);
    }

    #[test]
    fn cons_address_derives_from_the_consensus_key() {
        let validator = test_validator();

        let cons = validator.cons_address().unwrap();
        let expected = ConsAddress::from_pub_key(&validator.consensus_pubkey).unwrap();

        assert_eq!(cons, expected);
    }

    #[test]
    fn staking_genesis_survives_a_json_round_trip() {
        let genesis = StakingGenesis {
            params: StakingParams::default(),
            validators: vec![test_validator()],
        };

        let json = serde_json::to_string_pretty(&genesis).unwrap();
        let back: StakingGenesis = serde_json::from_str(&json).unwrap();

        assert_eq!(back.params, genesis.params);
        assert_eq!(back.validators, genesis.validators);
    }
}
