use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{BlockHeight, ConsAddress};

/// Per-validator liveness bookkeeping.
///
/// The harness seeds exactly one record per validator; afterwards only the
/// application's own slashing logic reads or updates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorSigningInfo {
    pub address: ConsAddress,
    pub start_height: BlockHeight,
    pub index_offset: u64,
    pub jailed_until: DateTime<Utc>,
    pub tombstoned: bool,
    pub missed_blocks_counter: u64,
}

impl ValidatorSigningInfo {
    /// A fresh record: zero counters, Unix-epoch jail-release time, not
    /// tombstoned.
    pub fn new(address: ConsAddress, start_height: BlockHeight) -> Self {
        Self {
            address,
            start_height,
            index_offset: 0,
            jailed_until: DateTime::UNIX_EPOCH,
            tombstoned: false,
            missed_blocks_counter: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlashingParams {
    pub signed_blocks_window: u64,
    pub downtime_jail_duration_secs: u64,
}

impl Default for SlashingParams {
    fn default() -> Self {
        Self {
            signed_blocks_window: 100,
            downtime_jail_duration_secs: 600,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlashingGenesis {
    #[serde(default)]
    pub params: SlashingParams,

    #[serde(default)]
    pub signing_infos: Vec<ValidatorSigningInfo>,
}
