use bech32::{Bech32, Hrp};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::keys::PublicKey;

pub const ACCOUNT_PREFIX: &str = "atria";
pub const VALIDATOR_PREFIX: &str = "atriavaloper";
pub const CONSENSUS_PREFIX: &str = "atriavalcons";

/// Length in bytes of the truncated key digest behind every address
pub const ADDRESS_BYTES: usize = 20;

#[derive(Debug, Error)]
pub enum AddressError {
    #[error("bech32 decoding failed: {0}")]
    Decode(#[from] bech32::DecodeError),

    #[error("bech32 encoding failed: {0}")]
    Encode(#[from] bech32::EncodeError),

    #[error("unexpected address prefix: {0}")]
    UnexpectedPrefix(String),
}

fn key_hash(pub_key: &PublicKey) -> [u8; ADDRESS_BYTES] {
    let digest = Sha256::digest(pub_key.as_bytes());

    let mut out = [0u8; ADDRESS_BYTES];
    out.copy_from_slice(&digest[..ADDRESS_BYTES]);
    out
}

fn encode(prefix: &str, bytes: &[u8]) -> Result<String, AddressError> {
    let hrp = Hrp::parse_unchecked(prefix);
    Ok(bech32::encode::<Bech32>(hrp, bytes)?)
}

macro_rules! address_newtype {
    ($name:ident, $prefix:expr) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Derives the address from a public key.
            pub fn from_pub_key(pub_key: &PublicKey) -> Result<Self, AddressError> {
                Ok(Self(encode($prefix, &key_hash(pub_key))?))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

address_newtype!(AccAddress, ACCOUNT_PREFIX);
address_newtype!(ValAddress, VALIDATOR_PREFIX);
address_newtype!(ConsAddress, CONSENSUS_PREFIX);

impl ValAddress {
    /// The account address holding the operator's funds. Same key bytes,
    /// account prefix.
    pub fn account(&self) -> Result<AccAddress, AddressError> {
        let (hrp, bytes) = bech32::decode(&self.0)?;

        if hrp != Hrp::parse_unchecked(VALIDATOR_PREFIX) {
            return Err(AddressError::UnexpectedPrefix(hrp.to_string()));
        }

        Ok(AccAddress(encode(ACCOUNT_PREFIX, &bytes)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::ValidatorKey;

    fn test_key() -> ValidatorKey {
        ValidatorKey::from_seed([7u8; 32])
    }

    #[test]
    fn derivation_uses_the_expected_prefixes() {
        let pub_key = test_key().public_key();

        let acc = AccAddress::from_pub_key(&pub_key).unwrap();
        let val = ValAddress::from_pub_key(&pub_key).unwrap();
        let cons = ConsAddress::from_pub_key(&pub_key).unwrap();

        assert!(acc.as_str().starts_with("atria1"));
        assert!(val.as_str().starts_with("atriavaloper1"));
        assert!(cons.as_str().starts_with("atriavalcons1"));
    }

    #[test]
    fn derivation_is_deterministic() {
        let pub_key = test_key().public_key();

        let a = ValAddress::from_pub_key(&pub_key).unwrap();
        let b = ValAddress::from_pub_key(&pub_key).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn operator_and_account_share_key_bytes() {
        let pub_key = test_key().public_key();

        let val = ValAddress::from_pub_key(&pub_key).unwrap();
        let acc = AccAddress::from_pub_key(&pub_key).unwrap();

        assert_eq!(val.account().unwrap(), acc);
    }

    #[test]
    fn distinct_keys_yield_distinct_addresses() {
        let a = ValidatorKey::from_seed([1u8; 32]).public_key();
        let b = ValidatorKey::from_seed([2u8; 32]).public_key();

        assert_ne!(
            ValAddress::from_pub_key(&a).unwrap(),
            ValAddress::from_pub_key(&b).unwrap()
        );
    }
}
