// Probe parameter presets
// Per-array recording parameters for the supported electrode arrays

use serde::{Deserialize, Serialize};

use crate::localize::window_span;
use crate::probe::lookup::ChannelId;

/// Recording parameters describing one electrode array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeSpec {
    /// Array name (e.g., "neuropixel")
    pub name: String,

    /// Number of recording channels
    pub num_channels: usize,

    /// Half-width of the amplitude window around a spike peak, in frames
    pub spike_delay: usize,

    /// Expected duration of a spike peak, in frames
    pub spike_peak_duration: usize,

    /// Window used for noise estimation, in frames
    pub noise_duration: usize,

    /// Noise amplitude tolerance, in percent
    pub noise_amp_percent: u32,

    /// Radius within which channels count as inner neighbors
    /// Same units as the channel positions
    pub inner_radius: f32,

    /// Sampling rate in frames per second
    pub fps: u32,

    /// Channels excluded from localization
    #[serde(default)]
    pub masked_channels: Vec<ChannelId>,
}

impl ProbeSpec {
    /// Neuropixels probe: 385 channels, channel 385 masked out
    pub fn neuropixel() -> Self {
        ProbeSpec {
            name: "neuropixel".to_string(),
            num_channels: 385,
            spike_delay: 5,
            spike_peak_duration: 4,
            noise_duration: 3,
            noise_amp_percent: 1,
            inner_radius: 40.0,
            fps: 30000,
            masked_channels: vec![385],
        }
    }

    /// 3Brain BioCam array with 4096 recording channels
    /// The frame rate comes from the recording file; 0 until known
    pub fn biocam() -> Self {
        ProbeSpec {
            name: "biocam".to_string(),
            num_channels: 4096,
            spike_delay: 5,
            spike_peak_duration: 4,
            noise_duration: 2,
            noise_amp_percent: 1,
            inner_radius: 1.5,
            fps: 0,
            masked_channels: vec![0],
        }
    }

    /// MaxWell MEA1k routed subset
    pub fn mea1k() -> Self {
        ProbeSpec {
            name: "mea1k".to_string(),
            num_channels: 69,
            spike_delay: 5,
            spike_peak_duration: 4,
            noise_duration: 2,
            noise_amp_percent: 1,
            inner_radius: 20.0,
            fps: 20000,
            masked_channels: Vec::new(),
        }
    }

    /// Look up a preset by name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "neuropixel" | "NeuroPixel" => Some(Self::neuropixel()),
            "biocam" | "BioCam" => Some(Self::biocam()),
            "mea1k" | "Mea1k" => Some(Self::mea1k()),
            _ => None,
        }
    }

    /// Number of samples in one amplitude window (`2 * spike_delay + 1`)
    /// None when `spike_delay` is too large for the span to fit in a `usize`
    pub fn window_span(&self) -> Option<usize> {
        window_span(self.spike_delay)
    }

    /// Serialize spec to JSON bytes
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec_pretty(self)
    }

    /// Deserialize spec from JSON bytes
    pub fn from_json_bytes(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }
}
