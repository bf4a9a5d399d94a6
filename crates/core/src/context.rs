use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{BlockHeight, ConsAddress, VotingPower};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub chain_id: String,
    pub height: BlockHeight,
    pub time: DateTime<Utc>,
}

/// The execution context a harness operation runs against.
///
/// Contexts are immutable values. Advancing the chain produces a fresh
/// context from the new block header and replaces the previous one
/// wholesale, so stale reads show up as stale values instead of silent
/// in-place mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    header: BlockHeader,
}

impl ExecutionContext {
    pub fn new(header: BlockHeader) -> Self {
        Self { header }
    }

    pub fn header(&self) -> &BlockHeader {
        &self.header
    }

    pub fn chain_id(&self) -> &str {
        &self.header.chain_id
    }

    pub fn block_height(&self) -> BlockHeight {
        self.header.height
    }

    pub fn block_time(&self) -> DateTime<Utc> {
        self.header.time
    }
}

/// One validator's vote over the previous block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteInfo {
    pub validator: ConsAddress,
    pub power: VotingPower,
    pub signed_last_block: bool,
}

/// Summary of the commit for the previous block, handed to the
/// begin-of-block hook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitInfo {
    pub votes: Vec<VoteInfo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockParams {
    pub max_bytes: i64,

    /// Negative means no gas ceiling.
    pub max_gas: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusParams {
    pub block: BlockParams,
}
