// Amplitude extraction
// Reduces each active neighbor's cutout window to its peak amplitude

use crate::localize::error::LocalizeError;
use crate::localize::types::{AmplitudeEntry, CutoutWindows, Spike};
use crate::probe::{ChannelMask, NeighborTable};

/// Extract the peak amplitude of every active neighbor of the spike's channel
///
/// Window `i` belongs to neighbor `i` of the spike's channel. Windows of
/// masked neighbors are skipped without being read. The result keeps
/// neighbor-table order and is empty when the spike carries no windows or
/// every neighbor is masked.
pub fn extract_amplitudes<L>(
    spike: &Spike,
    layout: &L,
    spike_delay: usize,
) -> Result<Vec<AmplitudeEntry>, LocalizeError>
where
    L: NeighborTable + ChannelMask + ?Sized,
{
    let windows = CutoutWindows::new(&spike.amplitude_cutouts, spike_delay)?;

    let neighbors = layout.neighbor_count(spike.channel);
    if windows.len() > neighbors {
        return Err(LocalizeError::NeighborCountMismatch {
            channel: spike.channel,
            windows: windows.len(),
            neighbors,
        });
    }

    let mut amps = Vec::with_capacity(windows.len());

    for (index, window) in windows.iter().enumerate() {
        let neighbor = layout
            .inner_neighbor(spike.channel, index)
            .ok_or(LocalizeError::MissingNeighbor {
                channel: spike.channel,
                index,
            })?;

        if !layout.is_active(neighbor) {
            continue;
        }

        // chunks_exact never yields an empty window
        if let Some(&peak) = window.iter().max() {
            amps.push(AmplitudeEntry::new(neighbor, i64::from(peak)));
        }
    }

    log::trace!(
        "Spike at frame {} on channel {}: {} of {} neighbor windows active",
        spike.frame,
        spike.channel,
        amps.len(),
        windows.len()
    );

    Ok(amps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{ChannelId, ChannelMask, NeighborTable};

    struct Table {
        neighbors: Vec<ChannelId>,
        inactive: Vec<ChannelId>,
    }

    impl NeighborTable for Table {
        fn neighbor_count(&self, channel: ChannelId) -> usize {
            if channel == 0 { self.neighbors.len() } else { 0 }
        }

        fn inner_neighbor(&self, channel: ChannelId, index: usize) -> Option<ChannelId> {
            if channel == 0 { self.neighbors.get(index).copied() } else { None }
        }
    }

    impl ChannelMask for Table {
        fn is_active(&self, channel: ChannelId) -> bool {
            !self.inactive.contains(&channel)
        }
    }

    #[test]
    fn test_extract_peak_per_window() {
        let table = Table { neighbors: vec![0, 4, 9], inactive: vec![] };
        let spike = Spike::new(0, 10, vec![1, 8, 2, -5, -3, -9, 0, 0, 6]);

        let amps = extract_amplitudes(&spike, &table, 1).unwrap();

        assert_eq!(
            amps,
            vec![
                AmplitudeEntry::new(0, 8),
                AmplitudeEntry::new(4, -3),
                AmplitudeEntry::new(9, 6),
            ]
        );
    }

    #[test]
    fn test_masked_neighbor_is_skipped() {
        let table = Table { neighbors: vec![0, 4, 9], inactive: vec![4] };
        // The masked neighbor's window holds the largest values
        let spike = Spike::new(0, 10, vec![1, 2, 3, 100, 200, 300, 7, 8, 9]);

        let amps = extract_amplitudes(&spike, &table, 1).unwrap();

        // Window offsets still follow the neighbor index
        assert_eq!(amps, vec![AmplitudeEntry::new(0, 3), AmplitudeEntry::new(9, 9)]);
    }

    #[test]
    fn test_fewer_windows_than_neighbors() {
        let table = Table { neighbors: vec![0, 4, 9], inactive: vec![] };
        let spike = Spike::new(0, 10, vec![5, 6, 7]);

        let amps = extract_amplitudes(&spike, &table, 1).unwrap();
        assert_eq!(amps, vec![AmplitudeEntry::new(0, 7)]);
    }

    #[test]
    fn test_more_windows_than_neighbors() {
        let table = Table { neighbors: vec![0], inactive: vec![] };
        let spike = Spike::new(0, 10, vec![1, 2, 3, 4, 5, 6]);

        let err = extract_amplitudes(&spike, &table, 1).unwrap_err();
        assert_eq!(
            err,
            LocalizeError::NeighborCountMismatch { channel: 0, windows: 2, neighbors: 1 }
        );
    }

    #[test]
    fn test_truncated_cutouts() {
        let table = Table { neighbors: vec![0, 4], inactive: vec![] };
        let spike = Spike::new(0, 10, vec![1, 2, 3, 4]);

        let err = extract_amplitudes(&spike, &table, 1).unwrap_err();
        assert_eq!(err, LocalizeError::TruncatedCutouts { len: 4, span: 3 });
    }

    #[test]
    fn test_no_windows() {
        let table = Table { neighbors: vec![0, 4], inactive: vec![] };
        let spike = Spike::new(0, 10, Vec::new());

        let amps = extract_amplitudes(&spike, &table, 5).unwrap();
        assert!(amps.is_empty());
    }

    #[test]
    fn test_all_neighbors_masked() {
        let table = Table { neighbors: vec![0, 4], inactive: vec![0, 4] };
        let spike = Spike::new(0, 10, vec![1, 2, 3, 4, 5, 6]);

        let amps = extract_amplitudes(&spike, &table, 1).unwrap();
        assert!(amps.is_empty());
    }
}
