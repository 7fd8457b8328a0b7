// Baseline correction
// Shifts peak amplitudes so the smallest becomes 1, turning them into weights

use crate::localize::error::LocalizeError;
use crate::localize::types::AmplitudeEntry;

/// Offset removed from every amplitude: one below the smallest amplitude
///
/// This is the minimum, not a median. The weakest channel keeps a weight of 1
/// so it still contributes to the centroid.
pub fn baseline(entries: &[AmplitudeEntry]) -> Option<i64> {
    entries.iter().map(|e| e.amplitude).min().map(|min| min - 1)
}

/// Subtract the shared baseline from every amplitude
///
/// A single entry is returned unchanged. Channel identities and order are
/// preserved.
pub fn correct_baseline(entries: &[AmplitudeEntry]) -> Result<Vec<AmplitudeEntry>, LocalizeError> {
    let corrected = match entries {
        [] => return Err(LocalizeError::EmptyAmplitudeList),
        [single] => vec![*single],
        _ => {
            let offset = baseline(entries).ok_or(LocalizeError::EmptyAmplitudeList)?;
            entries
                .iter()
                .map(|e| AmplitudeEntry::new(e.channel, e.amplitude - offset))
                .collect()
        }
    };

    let total: i64 = corrected.iter().map(|e| e.amplitude).sum();
    if total == 0 {
        return Err(LocalizeError::ZeroWeightSum);
    }

    Ok(corrected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(amps: &[i64]) -> Vec<AmplitudeEntry> {
        amps.iter()
            .enumerate()
            .map(|(channel, &amp)| AmplitudeEntry::new(channel, amp))
            .collect()
    }

    fn weights(entries: &[AmplitudeEntry]) -> Vec<i64> {
        entries.iter().map(|e| e.amplitude).collect()
    }

    #[test]
    fn test_minimum_maps_to_one() {
        let corrected = correct_baseline(&entries(&[5, 7, 9])).unwrap();
        assert_eq!(weights(&corrected), vec![1, 3, 5]);
    }

    #[test]
    fn test_order_and_channels_preserved() {
        let corrected = correct_baseline(&entries(&[40, -12, 3])).unwrap();

        let channels: Vec<usize> = corrected.iter().map(|e| e.channel).collect();
        assert_eq!(channels, vec![0, 1, 2]);
        assert_eq!(weights(&corrected), vec![53, 1, 16]);
    }

    #[test]
    fn test_all_weights_at_least_one() {
        let corrected = correct_baseline(&entries(&[-300, -299, -1000, 0, 42])).unwrap();
        assert!(corrected.iter().all(|e| e.amplitude >= 1));
        assert_eq!(corrected[2].amplitude, 1);
    }

    #[test]
    fn test_equal_amplitudes_become_uniform_weights() {
        let corrected = correct_baseline(&entries(&[17, 17, 17, 17])).unwrap();
        assert_eq!(weights(&corrected), vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_singleton_unchanged() {
        let corrected = correct_baseline(&entries(&[250])).unwrap();
        assert_eq!(corrected, vec![AmplitudeEntry::new(0, 250)]);
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(correct_baseline(&[]), Err(LocalizeError::EmptyAmplitudeList));
    }

    #[test]
    fn test_zero_singleton_rejected() {
        assert_eq!(
            correct_baseline(&entries(&[0])),
            Err(LocalizeError::ZeroWeightSum)
        );
    }

    #[test]
    fn test_baseline_value() {
        assert_eq!(baseline(&entries(&[5, 7, 9])), Some(4));
        assert_eq!(baseline(&[]), None);
    }
}
