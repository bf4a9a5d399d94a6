use atria_core::{
    BeginBlockRequest, BlockHeader, Chain, CommitInfo, EpochsModule, StakingModule, ValAddress,
    VoteInfo, VotingPower,
};
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::{env::TestEnv, error::HarnessError};

/// Nominal voting power attributed to the proposer in the synthesized
/// commit. Real power distribution is deliberately not modeled.
pub const PROPOSER_VOTING_POWER: VotingPower = 1000;

impl<C: Chain> TestEnv<C> {
    /// Advances the chain by one block.
    ///
    /// The proposer is the first validator in the application's
    /// enumeration order; use [`TestEnv::begin_block_with_proposer`] when
    /// a test needs a specific one. With `execute_next_epoch` the block
    /// time jumps to one second past the next epoch boundary and
    /// `time_increase_secs` is ignored.
    pub fn begin_block(
        &mut self,
        execute_next_epoch: bool,
        time_increase_secs: u64,
    ) -> Result<(), HarnessError> {
        let validators = self.app.staking().all_validators(&self.ctx)?;

        let proposer = validators
            .first()
            .ok_or(HarnessError::EmptyValidatorSet)?
            .operator_address
            .clone();

        self.begin_block_with_proposer(execute_next_epoch, &proposer, time_increase_secs)
    }

    /// Advances the chain by one block with an explicit proposer.
    pub fn begin_block_with_proposer(
        &mut self,
        execute_next_epoch: bool,
        proposer: &ValAddress,
        time_increase_secs: u64,
    ) -> Result<(), HarnessError> {
        let validator = self
            .app
            .staking()
            .validator(&self.ctx, proposer)?
            .ok_or_else(|| HarnessError::ValidatorNotFound(proposer.clone()))?;

        let address = validator.cons_address()?;

        let time = if execute_next_epoch {
            self.next_epoch_boundary()?
        } else {
            let increase = i64::try_from(time_increase_secs)
                .ok()
                .and_then(Duration::try_seconds)
                .ok_or(HarnessError::TimeIncreaseOutOfRange(time_increase_secs))?;

            self.ctx
                .block_time()
                .checked_add_signed(increase)
                .ok_or(HarnessError::TimeIncreaseOutOfRange(time_increase_secs))?
        };

        let header = BlockHeader {
            chain_id: self.ctx.chain_id().to_owned(),
            height: self.ctx.block_height() + 1,
            time,
        };

        let last_commit = CommitInfo {
            votes: vec![VoteInfo {
                validator: address,
                power: PROPOSER_VOTING_POWER,
                signed_last_block: true,
            }],
        };

        self.app.begin_block(BeginBlockRequest {
            header: header.clone(),
            last_commit,
        })?;

        // the new header is authoritative from here on
        self.ctx = self.app.new_context(header);

        debug!(
            height = self.ctx.block_height(),
            time = %self.ctx.block_time(),
            "block began"
        );

        Ok(())
    }

    /// One second past the end of the current epoch window of the
    /// incentive epoch stream.
    fn next_epoch_boundary(&self) -> Result<DateTime<Utc>, HarnessError> {
        let identifier = self.app.epochs().distr_epoch_identifier(&self.ctx)?;

        let epoch = self
            .app
            .epochs()
            .epoch_info(&self.ctx, &identifier)?
            .ok_or(HarnessError::UnknownEpoch(identifier))?;

        // before the first block the stream has not started yet; anchor
        // the window at the current block time
        let start = epoch
            .current_epoch_start_time
            .unwrap_or_else(|| self.ctx.block_time());

        Ok(start + epoch.duration() + Duration::seconds(1))
    }
}
