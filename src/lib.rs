// spikeloc - Spike localization for dense multi-electrode arrays
// Module declarations

pub mod localize;
pub mod pipeline;
pub mod probe;

pub use localize::{
    LocalizeError, Localizer, LocalizerConfig, NegativeWeightPolicy, Position, Spike, Stage,
};
#[cfg(feature = "parallel")]
pub use pipeline::localize_batch_parallel;
pub use pipeline::{localize_batch, BatchReport, TraceWriter};
pub use probe::{Probe, ProbeError, ProbeLayout, ProbeSpec};
