// Batch localization and tracing
// Runs the localizer over many spikes and records per-spike outcomes

pub mod batch;
pub mod trace;

#[cfg(feature = "parallel")]
pub use batch::localize_batch_parallel;
pub use batch::{localize_batch, BatchReport, LocatedSpike, RejectedSpike};
pub use trace::{read_trace_file, TraceEntry, TraceError, TraceOutcome, TraceWriter};
