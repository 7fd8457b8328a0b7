// Center of mass
// Amplitude-weighted average of neighbor channel positions

use serde::{Deserialize, Serialize};

use crate::localize::error::LocalizeError;
use crate::localize::types::{AmplitudeEntry, Position};
use crate::probe::ChannelPositions;

/// What to do with a negative weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeWeightPolicy {
    /// Fail the spike with `NegativeWeightDetected`
    #[default]
    Reject,

    /// Log a warning and keep the weight
    Warn,
}

/// Compute the weighted centroid of the entries' channel positions
///
/// Numerators and the denominator are summed as integers and divided once.
/// A zero weight sum is an error rather than a (0, 0) or NaN position.
pub fn center_of_mass<P>(
    entries: &[AmplitudeEntry],
    positions: &P,
    policy: NegativeWeightPolicy,
) -> Result<Position, LocalizeError>
where
    P: ChannelPositions + ?Sized,
{
    let mut x_numerator: i128 = 0;
    let mut y_numerator: i128 = 0;
    let mut denominator: i128 = 0;

    for entry in entries {
        let (x, y) = positions
            .channel_position(entry.channel)
            .ok_or(LocalizeError::UnknownChannel(entry.channel))?;

        if entry.amplitude < 0 {
            match policy {
                NegativeWeightPolicy::Reject => {
                    return Err(LocalizeError::NegativeWeightDetected {
                        channel: entry.channel,
                        weight: entry.amplitude,
                    });
                }
                NegativeWeightPolicy::Warn => {
                    log::warn!(
                        "Negative weight {} on channel {}",
                        entry.amplitude,
                        entry.channel
                    );
                }
            }
        }

        let weight = i128::from(entry.amplitude);
        x_numerator += weight * i128::from(x);
        y_numerator += weight * i128::from(y);
        denominator += weight;
    }

    if denominator == 0 {
        log::debug!("Zero weight sum over {} entries: {:?}", entries.len(), entries);
        return Err(LocalizeError::ZeroWeightSum);
    }

    Ok(Position::new(
        x_numerator as f64 / denominator as f64,
        y_numerator as f64 / denominator as f64,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ChannelId;

    struct Grid(Vec<(i32, i32)>);

    impl ChannelPositions for Grid {
        fn channel_position(&self, channel: ChannelId) -> Option<(i32, i32)> {
            self.0.get(channel).copied()
        }
    }

    fn triangle() -> Grid {
        Grid(vec![(0, 0), (1, 0), (0, 1)])
    }

    #[test]
    fn test_weighted_centroid() {
        let entries = [
            AmplitudeEntry::new(0, 1),
            AmplitudeEntry::new(1, 3),
            AmplitudeEntry::new(2, 5),
        ];

        let pos = center_of_mass(&entries, &triangle(), NegativeWeightPolicy::Reject).unwrap();

        assert!((pos.x - 3.0 / 9.0).abs() < 1e-12);
        assert!((pos.y - 5.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_uniform_weights_give_mean() {
        let grid = Grid(vec![(0, 0), (30, 0), (0, 60), (30, 60)]);
        let entries: Vec<_> = (0..4).map(|ch| AmplitudeEntry::new(ch, 7)).collect();

        let pos = center_of_mass(&entries, &grid, NegativeWeightPolicy::Reject).unwrap();

        assert_eq!(pos, Position::new(15.0, 30.0));
    }

    #[test]
    fn test_zero_denominator() {
        let entries = [AmplitudeEntry::new(0, 0), AmplitudeEntry::new(1, 0)];
        let result = center_of_mass(&entries, &triangle(), NegativeWeightPolicy::Reject);
        assert_eq!(result, Err(LocalizeError::ZeroWeightSum));

        let result = center_of_mass(&[], &triangle(), NegativeWeightPolicy::Reject);
        assert_eq!(result, Err(LocalizeError::ZeroWeightSum));
    }

    #[test]
    fn test_negative_weight_rejected() {
        let entries = [AmplitudeEntry::new(0, 4), AmplitudeEntry::new(1, -1)];
        let result = center_of_mass(&entries, &triangle(), NegativeWeightPolicy::Reject);
        assert_eq!(
            result,
            Err(LocalizeError::NegativeWeightDetected { channel: 1, weight: -1 })
        );
    }

    #[test]
    fn test_negative_weight_warn_continues() {
        let entries = [AmplitudeEntry::new(1, 4), AmplitudeEntry::new(2, -1)];
        let pos = center_of_mass(&entries, &triangle(), NegativeWeightPolicy::Warn).unwrap();

        // (4 * 1 + -1 * 0) / 3, (4 * 0 + -1 * 1) / 3
        assert!((pos.x - 4.0 / 3.0).abs() < 1e-12);
        assert!((pos.y + 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_channel() {
        let entries = [AmplitudeEntry::new(0, 1), AmplitudeEntry::new(8, 1)];
        let result = center_of_mass(&entries, &triangle(), NegativeWeightPolicy::Reject);
        assert_eq!(result, Err(LocalizeError::UnknownChannel(8)));
    }

    #[test]
    fn test_large_values_do_not_overflow() {
        let grid = Grid(vec![(i32::MAX, i32::MIN), (i32::MAX, i32::MIN)]);
        let entries = [
            AmplitudeEntry::new(0, i64::from(u32::MAX)),
            AmplitudeEntry::new(1, i64::from(u32::MAX)),
        ];

        let pos = center_of_mass(&entries, &grid, NegativeWeightPolicy::Reject).unwrap();

        assert!((pos.x - i32::MAX as f64).abs() < 1e-3);
        assert!((pos.y - i32::MIN as f64).abs() < 1e-3);
    }
}
