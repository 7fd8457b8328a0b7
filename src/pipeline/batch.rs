// Batch localization
// Localizes many spikes, keeping going past per-spike failures

use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::localize::{LocalizeError, Localizer, Position, Spike, Stage};
use crate::pipeline::trace::TraceEntry;
use crate::probe::{ChannelId, ProbeLayout};

/// A spike that was localized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocatedSpike {
    /// Index of the spike in the input batch
    pub index: usize,
    pub channel: ChannelId,
    pub frame: i64,
    pub position: Position,
}

/// A spike that could not be localized
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedSpike {
    /// Index of the spike in the input batch
    pub index: usize,
    pub channel: ChannelId,
    pub frame: i64,

    /// Stage that failed
    pub stage: Stage,

    /// Human-readable failure description
    pub reason: String,
}

/// Outcome of localizing a batch of spikes, in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub located: Vec<LocatedSpike>,
    pub rejected: Vec<RejectedSpike>,
}

impl BatchReport {
    /// Pair each spike with its localization result
    fn from_outcomes<I>(spikes: &[Spike], outcomes: I) -> Self
    where
        I: IntoIterator<Item = Result<Position, LocalizeError>>,
    {
        let mut report = BatchReport::default();

        for (index, (spike, outcome)) in spikes.iter().zip(outcomes).enumerate() {
            match outcome {
                Ok(position) => report.located.push(LocatedSpike {
                    index,
                    channel: spike.channel,
                    frame: spike.frame,
                    position,
                }),
                Err(e) => {
                    log::debug!(
                        "Rejected spike {} (frame {}, channel {}) at {}: {}",
                        index,
                        spike.frame,
                        spike.channel,
                        e.stage(),
                        e
                    );
                    report.rejected.push(RejectedSpike {
                        index,
                        channel: spike.channel,
                        frame: spike.frame,
                        stage: e.stage(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if !report.rejected.is_empty() {
            log::warn!(
                "Rejected {} of {} spikes during localization",
                report.rejected.len(),
                report.total()
            );
        }
        log::info!("Localized {} spikes", report.located.len());

        report
    }

    /// Number of spikes processed
    pub fn total(&self) -> usize {
        self.located.len() + self.rejected.len()
    }

    /// Fraction of spikes rejected [0.0, 1.0]
    pub fn rejection_rate(&self) -> f32 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.rejected.len() as f32 / total as f32
    }

    /// Number of rejections attributed to a stage
    pub fn rejected_at(&self, stage: Stage) -> usize {
        self.rejected.iter().filter(|r| r.stage == stage).count()
    }

    /// Trace entries for every spike, in input order
    pub fn trace_entries(&self) -> Vec<TraceEntry> {
        let mut entries: Vec<(usize, TraceEntry)> = self
            .located
            .iter()
            .map(|s| (s.index, TraceEntry::located(s.frame, s.channel, s.position)))
            .chain(self.rejected.iter().map(|s| {
                (
                    s.index,
                    TraceEntry::rejected(s.frame, s.channel, s.stage, s.reason.clone()),
                )
            }))
            .collect();

        entries.sort_by_key(|(index, _)| *index);
        entries.into_iter().map(|(_, entry)| entry).collect()
    }
}

/// Localize every spike in order
pub fn localize_batch<L>(localizer: &Localizer<'_, L>, spikes: &[Spike]) -> BatchReport
where
    L: ProbeLayout + ?Sized,
{
    BatchReport::from_outcomes(spikes, spikes.iter().map(|spike| localizer.localize(spike)))
}

/// Localize spikes across the rayon thread pool
/// Produces the same report as `localize_batch`
#[cfg(feature = "parallel")]
pub fn localize_batch_parallel<L>(localizer: &Localizer<'_, L>, spikes: &[Spike]) -> BatchReport
where
    L: ProbeLayout + Sync + ?Sized,
{
    let outcomes: Vec<Result<Position, LocalizeError>> = spikes
        .par_iter()
        .map(|spike| localizer.localize(spike))
        .collect();

    BatchReport::from_outcomes(spikes, outcomes)
}
