//! music-checker library interface
//!
//! Classifies audio files as silent / whisper-level versus audible using
//! loudness statistics, moves positives into a quarantine directory, and
//! writes a plain-text report. `scan_folder` is the main entry point; the
//! CLI binary is a thin shell over it.

pub mod config;
pub mod decoder;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{Result, ScanError};
pub use crate::models::{
    ClassificationThresholds, LoudnessMetrics, ScanEvent, ScanOutcome, ScanReport,
};
pub use crate::services::{compute_metrics, is_silent, scan_folder, ScanOptions};
