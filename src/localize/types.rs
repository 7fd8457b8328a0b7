// Localization types
// Spike input, the windowed view over its amplitude cutouts, and results

use serde::{Deserialize, Serialize};
use std::slice::ChunksExact;

use crate::localize::error::LocalizeError;
use crate::probe::ChannelId;

/// A detected spike as handed over by the detection stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spike {
    /// Channel the spike was detected on
    pub channel: ChannelId,

    /// Frame of the spike peak, used to identify the spike in diagnostics
    pub frame: i64,

    /// Amplitude samples, one window per candidate neighbor in neighbor-table order
    /// Each window spans `2 * spike_delay + 1` frames centered on the peak
    pub amplitude_cutouts: Vec<i32>,
}

impl Spike {
    pub fn new(channel: ChannelId, frame: i64, amplitude_cutouts: Vec<i32>) -> Self {
        Spike {
            channel,
            frame,
            amplitude_cutouts,
        }
    }
}

/// Peak amplitude observed on one neighbor channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmplitudeEntry {
    pub channel: ChannelId,
    pub amplitude: i64,
}

impl AmplitudeEntry {
    pub fn new(channel: ChannelId, amplitude: i64) -> Self {
        AmplitudeEntry { channel, amplitude }
    }
}

/// Estimated origin of a spike on the array surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }
}

/// Samples in one amplitude window, `2 * spike_delay + 1`
/// None when the span does not fit in a `usize`
pub fn window_span(spike_delay: usize) -> Option<usize> {
    spike_delay.checked_mul(2)?.checked_add(1)
}

/// Amplitude cutouts viewed as consecutive fixed-size windows
#[derive(Debug, Clone, Copy)]
pub struct CutoutWindows<'a> {
    samples: &'a [i32],
    span: usize,
}

impl<'a> CutoutWindows<'a> {
    /// Split `samples` into windows of `2 * spike_delay + 1`
    /// Fails if the buffer does not hold a whole number of windows
    pub fn new(samples: &'a [i32], spike_delay: usize) -> Result<Self, LocalizeError> {
        let span = window_span(spike_delay).ok_or(LocalizeError::InvalidSpikeDelay(spike_delay))?;
        if samples.len() % span != 0 {
            return Err(LocalizeError::TruncatedCutouts {
                len: samples.len(),
                span,
            });
        }

        Ok(CutoutWindows { samples, span })
    }

    /// Samples per window
    pub fn span(&self) -> usize {
        self.span
    }

    /// Number of windows
    pub fn len(&self) -> usize {
        self.samples.len() / self.span
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The `index`-th window
    pub fn get(&self, index: usize) -> Option<&'a [i32]> {
        let start = index.checked_mul(self.span)?;
        let end = start.checked_add(self.span)?;
        self.samples.get(start..end)
    }

    pub fn iter(&self) -> ChunksExact<'a, i32> {
        self.samples.chunks_exact(self.span)
    }
}
