// Lookup interfaces consumed by the localizer
// Implemented by the probe (or any host-owned table) and queried per spike

/// Index of a recording channel on the array
pub type ChannelId = usize;

/// Physical coordinates of each channel
pub trait ChannelPositions {
    /// Position of `channel` on the array surface, or None if the channel is unknown
    fn channel_position(&self, channel: ChannelId) -> Option<(i32, i32)>;
}

/// Ordered neighbor lists per channel
///
/// The order is significant: neighbor `i` of a channel owns the `i`-th
/// amplitude window of a spike detected on that channel.
pub trait NeighborTable {
    /// Number of neighbors listed for `channel` (0 for unknown channels)
    fn neighbor_count(&self, channel: ChannelId) -> usize;

    /// The `index`-th neighbor of `channel`
    fn inner_neighbor(&self, channel: ChannelId, index: usize) -> Option<ChannelId>;
}

/// Active/inactive state per channel
pub trait ChannelMask {
    fn is_active(&self, channel: ChannelId) -> bool;
}

/// Everything the localizer needs to know about the array
pub trait ProbeLayout: ChannelPositions + NeighborTable + ChannelMask {}

impl<T: ChannelPositions + NeighborTable + ChannelMask + ?Sized> ProbeLayout for T {}
