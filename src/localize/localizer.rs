// Spike localizer
// Runs extraction, baseline correction and center of mass for one spike at a time

use serde::{Deserialize, Serialize};

use crate::localize::baseline::correct_baseline;
use crate::localize::centroid::{center_of_mass, NegativeWeightPolicy};
use crate::localize::error::LocalizeError;
use crate::localize::extract::extract_amplitudes;
use crate::localize::types::{Position, Spike};
use crate::probe::{Probe, ProbeLayout, ProbeSpec};

/// Configuration for spike localization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizerConfig {
    /// Half-width of each amplitude window in frames
    /// Windows span `2 * spike_delay + 1` frames
    pub spike_delay: usize,

    /// Handling of negative weights reaching the centroid
    #[serde(default)]
    pub negative_weights: NegativeWeightPolicy,
}

impl Default for LocalizerConfig {
    fn default() -> Self {
        LocalizerConfig {
            spike_delay: 5,
            negative_weights: NegativeWeightPolicy::Reject,
        }
    }
}

impl LocalizerConfig {
    /// Configuration matching a probe's recording parameters
    pub fn from_spec(spec: &ProbeSpec) -> Self {
        LocalizerConfig {
            spike_delay: spec.spike_delay,
            ..Default::default()
        }
    }

    /// Serialize config to JSON bytes
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec_pretty(self)
    }

    /// Deserialize config from JSON bytes
    pub fn from_json_bytes(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }
}

/// Localizes spikes against a borrowed, read-only probe layout
///
/// Holds no per-spike state, so one localizer can serve many threads.
#[derive(Debug)]
pub struct Localizer<'a, L: ?Sized> {
    layout: &'a L,
    config: LocalizerConfig,
}

impl<'a, L: ?Sized> Clone for Localizer<'a, L> {
    fn clone(&self) -> Self {
        Localizer {
            layout: self.layout,
            config: self.config.clone(),
        }
    }
}

impl<'a> Localizer<'a, Probe> {
    /// Localizer using the probe's own spike delay
    pub fn for_probe(probe: &'a Probe) -> Self {
        Localizer::new(probe, LocalizerConfig::from_spec(probe.spec()))
    }
}

impl<'a, L: ProbeLayout + ?Sized> Localizer<'a, L> {
    pub fn new(layout: &'a L, config: LocalizerConfig) -> Self {
        Localizer { layout, config }
    }

    pub fn config(&self) -> &LocalizerConfig {
        &self.config
    }

    pub fn layout(&self) -> &'a L {
        self.layout
    }

    /// Estimate where on the array the spike originated
    pub fn localize(&self, spike: &Spike) -> Result<Position, LocalizeError> {
        let amps = extract_amplitudes(spike, self.layout, self.config.spike_delay)?;
        if amps.is_empty() {
            return Err(LocalizeError::EmptyAmplitudeList);
        }

        let weights = correct_baseline(&amps)?;
        center_of_mass(&weights, self.layout, self.config.negative_weights)
    }
}
