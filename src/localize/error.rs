// Localization errors
// Per-spike failures, tagged with the stage that produced them

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::probe::ChannelId;

/// Localization stage a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Extraction,
    BaselineCorrection,
    Centroid,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Extraction => "extraction",
            Stage::BaselineCorrection => "baseline_correction",
            Stage::Centroid => "centroid",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while localizing a single spike
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocalizeError {
    #[error("Spike delay {0} gives a window span that overflows")]
    InvalidSpikeDelay(usize),

    #[error("Amplitude cutouts of length {len} are not a whole number of {span}-sample windows")]
    TruncatedCutouts { len: usize, span: usize },

    #[error("Spike on channel {channel} carries {windows} windows but the channel has {neighbors} neighbors")]
    NeighborCountMismatch {
        channel: ChannelId,
        windows: usize,
        neighbors: usize,
    },

    #[error("Channel {channel} has no neighbor at index {index}")]
    MissingNeighbor { channel: ChannelId, index: usize },

    #[error("No active neighbor amplitudes to localize")]
    EmptyAmplitudeList,

    #[error("Weights sum to zero")]
    ZeroWeightSum,

    #[error("Negative weight {weight} on channel {channel}")]
    NegativeWeightDetected { channel: ChannelId, weight: i64 },

    #[error("No position for channel {0}")]
    UnknownChannel(ChannelId),
}

impl LocalizeError {
    /// The stage whose output was invalid
    pub fn stage(&self) -> Stage {
        match self {
            LocalizeError::InvalidSpikeDelay(_)
            | LocalizeError::TruncatedCutouts { .. }
            | LocalizeError::NeighborCountMismatch { .. }
            | LocalizeError::MissingNeighbor { .. }
            | LocalizeError::EmptyAmplitudeList => Stage::Extraction,
            LocalizeError::ZeroWeightSum => Stage::BaselineCorrection,
            LocalizeError::NegativeWeightDetected { .. } | LocalizeError::UnknownChannel(_) => {
                Stage::Centroid
            }
        }
    }
}
