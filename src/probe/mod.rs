// Probe module
// Channel geometry, neighbor adjacency and channel masking for electrode arrays

pub mod lookup;
pub mod presets;
pub mod tables;

pub use lookup::{ChannelId, ChannelMask, ChannelPositions, NeighborTable, ProbeLayout};
pub use presets::ProbeSpec;
pub use tables::{parse_neighbors, parse_positions, Probe, ProbeError};
