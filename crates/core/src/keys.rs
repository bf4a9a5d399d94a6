use ed25519_dalek::{Signature, Signer, SigningKey};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An ed25519 public key in raw byte form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey(#[serde(with = "hex::serde")] pub [u8; 32]);

impl PublicKey {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Display for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Private key material for a validator created through the harness.
///
/// The harness keeps these around so that tests can sign payloads on behalf
/// of the validators they created.
#[derive(Clone)]
pub struct ValidatorKey {
    signing: SigningKey,
}

impl ValidatorKey {
    pub fn generate() -> Self {
        Self::from_seed(rand::rng().random())
    }

    /// Builds the key from a fixed seed, for reproducible setups.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            signing: SigningKey::from_bytes(&seed),
        }
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.signing.verifying_key().to_bytes())
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        self.signing.sign(message)
    }
}

impl std::fmt::Debug for ValidatorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ValidatorKey").field(&self.public_key()).finish()
    }
}
