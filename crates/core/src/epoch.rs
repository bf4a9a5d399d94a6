use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A named, fixed-duration recurring time window tracked by the
/// application. The harness only reads these to compute the next boundary
/// during epoch-aware advancement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpochInfo {
    pub identifier: String,
    pub duration_secs: u64,

    #[serde(default)]
    pub current_epoch: u64,

    /// Unset until the first block starts the epoch stream.
    #[serde(default)]
    pub current_epoch_start_time: Option<DateTime<Utc>>,
}

impl EpochInfo {
    pub fn new(identifier: impl Into<String>, duration_secs: u64) -> Self {
        Self {
            identifier: identifier.into(),
            duration_secs,
            current_epoch: 0,
            current_epoch_start_time: None,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::seconds(self.duration_secs as i64)
    }

    /// The end of the current epoch window, if the stream has started.
    pub fn current_boundary_end(&self) -> Option<DateTime<Utc>> {
        self.current_epoch_start_time
            .map(|start| start + self.duration())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EpochsGenesis {
    #[serde(default)]
    pub epochs: Vec<EpochInfo>,
}

/// Parameters of the incentive module, which pins the epoch stream the
/// harness's epoch-skip advancement follows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncentivesParams {
    pub distr_epoch_identifier: String,
}

impl Default for IncentivesParams {
    fn default() -> Self {
        Self {
            distr_epoch_identifier: "day".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncentivesGenesis {
    #[serde(default)]
    pub params: IncentivesParams,
}
