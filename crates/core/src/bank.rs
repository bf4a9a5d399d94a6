use serde::{Deserialize, Serialize};

use crate::{AccAddress, Amount};

/// Serde helpers for token amounts.
///
/// Amounts travel as decimal strings in genesis JSON so that values beyond
/// the range of a JSON number survive a round trip intact.
pub mod amount_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::Amount;

    pub fn serialize<S: Serializer>(value: &Amount, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Amount, D::Error> {
        let repr = String::deserialize(deserializer)?;
        repr.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,

    #[serde(with = "amount_serde")]
    pub amount: Amount,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: Amount) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

impl std::fmt::Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankParams {
    pub default_send_enabled: bool,
}

impl Default for BankParams {
    fn default() -> Self {
        Self {
            default_send_enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub address: AccAddress,
    pub coins: Vec<Coin>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BankGenesis {
    #[serde(default)]
    pub params: BankParams,

    #[serde(default)]
    pub balances: Vec<Balance>,
}
