//! Data models for music-checker

pub mod metrics;
pub mod outcome;

pub use metrics::{ClassificationThresholds, LoudnessMetrics};
pub use outcome::{ScanEvent, ScanOutcome, ScanReport};
