// Spike localization module
// Amplitude extraction, baseline correction, and center-of-mass estimation

pub mod baseline;
pub mod centroid;
pub mod error;
pub mod extract;
pub mod localizer;
pub mod types;

pub use baseline::correct_baseline;
pub use centroid::{center_of_mass, NegativeWeightPolicy};
pub use error::{LocalizeError, Stage};
pub use extract::extract_amplitudes;
pub use localizer::{Localizer, LocalizerConfig};
pub use types::{window_span, AmplitudeEntry, CutoutWindows, Position, Spike};
