// Probe lookup tables
// Loads channel positions and neighbor matrices and tracks the channel mask

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::probe::lookup::{ChannelId, ChannelMask, ChannelPositions, NeighborTable};
use crate::probe::presets::ProbeSpec;

/// Errors that can occur while building a probe
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid value {token:?} on line {line}")]
    Parse { line: usize, token: String },

    #[error("Line {line} has no x/y coordinate pair")]
    MissingCoordinate { line: usize },

    #[error("Channel {channel} lists neighbor {neighbor}, but the probe has {num_channels} channels")]
    NeighborOutOfRange {
        channel: ChannelId,
        neighbor: ChannelId,
        num_channels: usize,
    },

    #[error("Channel index too big: {0}")]
    ChannelOutOfRange(ChannelId),
}

/// Parse one comma-separated line, ignoring the trailing comma the table files carry
fn parse_line<T: std::str::FromStr>(line_no: usize, line: &str) -> Result<Vec<T>, ProbeError> {
    line.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<T>().map_err(|_| ProbeError::Parse {
                line: line_no,
                token: token.to_string(),
            })
        })
        .collect()
}

/// Parse a positions table: one `x,y,` line per channel
pub fn parse_positions(contents: &str) -> Result<Vec<(i32, i32)>, ProbeError> {
    let mut positions = Vec::new();

    for (idx, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let values: Vec<i32> = parse_line(idx + 1, line)?;
        match values.as_slice() {
            [x, y, ..] => positions.push((*x, *y)),
            _ => return Err(ProbeError::MissingCoordinate { line: idx + 1 }),
        }
    }

    Ok(positions)
}

/// Parse a neighbor matrix: one comma-separated neighbor list per channel
pub fn parse_neighbors(contents: &str) -> Result<Vec<Vec<ChannelId>>, ProbeError> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_line::<ChannelId>(idx + 1, line))
        .collect()
}

/// An electrode array with its geometry, neighbor matrix and channel mask
#[derive(Debug, Clone)]
pub struct Probe {
    spec: ProbeSpec,
    positions: Vec<(i32, i32)>,
    neighbors: Vec<Vec<ChannelId>>,
    active: Vec<bool>,
}

impl Probe {
    /// Build a probe from in-memory tables
    /// Channels listed in `spec.masked_channels` start inactive
    pub fn new(
        spec: ProbeSpec,
        positions: Vec<(i32, i32)>,
        neighbors: Vec<Vec<ChannelId>>,
    ) -> Result<Self, ProbeError> {
        let num_channels = positions.len();

        for (channel, list) in neighbors.iter().enumerate() {
            if let Some(&neighbor) = list.iter().find(|&&n| n >= num_channels) {
                return Err(ProbeError::NeighborOutOfRange {
                    channel,
                    neighbor,
                    num_channels,
                });
            }
        }

        if num_channels != spec.num_channels {
            log::warn!(
                "Probe {} declares {} channels but the positions table has {}",
                spec.name,
                spec.num_channels,
                num_channels
            );
        }
        if neighbors.len() != num_channels {
            log::warn!(
                "Probe {} has {} neighbor lists for {} channels",
                spec.name,
                neighbors.len(),
                num_channels
            );
        }

        let masked = spec.masked_channels.clone();
        let mut probe = Probe {
            spec,
            positions,
            neighbors,
            active: vec![true; num_channels],
        };
        for channel in masked {
            probe.mask_channel(channel);
        }

        log::info!(
            "Loaded probe {}: {} channels, {} active, up to {} neighbors",
            probe.spec.name,
            probe.num_channels(),
            probe.active_channel_count(),
            probe.max_neighbors()
        );

        Ok(probe)
    }

    /// Load the positions and neighbor matrix files for a probe
    pub fn from_files(
        spec: ProbeSpec,
        positions_path: &Path,
        neighbors_path: &Path,
    ) -> Result<Self, ProbeError> {
        let positions = parse_positions(&fs::read_to_string(positions_path)?)?;
        let neighbors = parse_neighbors(&fs::read_to_string(neighbors_path)?)?;
        Self::new(spec, positions, neighbors)
    }

    pub fn spec(&self) -> &ProbeSpec {
        &self.spec
    }

    pub fn num_channels(&self) -> usize {
        self.positions.len()
    }

    /// Longest neighbor list on the probe
    pub fn max_neighbors(&self) -> usize {
        self.neighbors.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn active_channel_count(&self) -> usize {
        self.active.iter().filter(|&&a| a).count()
    }

    /// Exclude a channel from localization
    /// Unknown channels are ignored with a warning
    pub fn mask_channel(&mut self, channel: ChannelId) {
        match self.active.get_mut(channel) {
            Some(flag) => *flag = false,
            None => log::warn!(
                "Ignoring mask for channel {} on probe {} ({} channels)",
                channel,
                self.spec.name,
                self.active.len()
            ),
        }
    }

    /// Re-include a previously masked channel
    /// Unknown channels are ignored with a warning
    pub fn unmask_channel(&mut self, channel: ChannelId) {
        match self.active.get_mut(channel) {
            Some(flag) => *flag = true,
            None => log::warn!(
                "Ignoring unmask for channel {} on probe {} ({} channels)",
                channel,
                self.spec.name,
                self.active.len()
            ),
        }
    }

    /// Positions for a list of channels, failing on the first unknown channel
    pub fn channel_positions(&self, channels: &[ChannelId]) -> Result<Vec<(i32, i32)>, ProbeError> {
        channels
            .iter()
            .map(|&channel| {
                self.positions
                    .get(channel)
                    .copied()
                    .ok_or(ProbeError::ChannelOutOfRange(channel))
            })
            .collect()
    }
}

impl ChannelPositions for Probe {
    fn channel_position(&self, channel: ChannelId) -> Option<(i32, i32)> {
        self.positions.get(channel).copied()
    }
}

impl NeighborTable for Probe {
    fn neighbor_count(&self, channel: ChannelId) -> usize {
        self.neighbors.get(channel).map(Vec::len).unwrap_or(0)
    }

    fn inner_neighbor(&self, channel: ChannelId, index: usize) -> Option<ChannelId> {
        self.neighbors.get(channel)?.get(index).copied()
    }
}

impl ChannelMask for Probe {
    fn is_active(&self, channel: ChannelId) -> bool {
        self.active.get(channel).copied().unwrap_or(false)
    }
}
