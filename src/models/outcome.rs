//! Per-file scan outcomes, progress events, and the final scan report

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::LoudnessMetrics;

/// Outcome of processing one enumerated file
///
/// Outcomes accumulate in completion order, which depends on worker
/// scheduling rather than enumeration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScanOutcome {
    /// Classified silent and moved into the quarantine directory
    Quarantined {
        file_name: String,
        metrics: LoudnessMetrics,
    },

    /// Classified audible; left in place, no report line
    Kept { file_name: String },

    /// Decode or filesystem failure; left in place, recorded in the report
    Failed { file_name: String, reason: String },
}

impl ScanOutcome {
    pub fn file_name(&self) -> &str {
        match self {
            ScanOutcome::Quarantined { file_name, .. }
            | ScanOutcome::Kept { file_name }
            | ScanOutcome::Failed { file_name, .. } => file_name,
        }
    }

    /// Report line for this outcome, or `None` for kept files.
    pub fn report_line(&self) -> Option<String> {
        match self {
            ScanOutcome::Quarantined { file_name, metrics } => {
                Some(format!("{} ({})", file_name, metrics.summary()))
            }
            ScanOutcome::Failed { file_name, .. } => Some(format!("{} (Error)", file_name)),
            ScanOutcome::Kept { .. } => None,
        }
    }
}

/// Progress events pushed to the presentation layer
///
/// Sent over an mpsc channel so the CLI (or a future GUI) observes scan
/// progress without any shared mutable state.
#[derive(Debug, Clone)]
pub enum ScanEvent {
    /// Dispatch is starting; `total` files matched the allow-list
    Started { total: usize },

    /// One file finished; `completed` counts finished files so far
    FileFinished {
        completed: usize,
        total: usize,
        outcome: ScanOutcome,
    },

    /// All workers settled (or the scan was cancelled) and the report is final
    Finished { cancelled: bool },
}

/// Final result of one scan invocation
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Path of the written report file
    pub report_path: PathBuf,

    /// Quarantine directory (may not exist if nothing was quarantined)
    pub quarantine_dir: PathBuf,

    /// All outcomes in completion order
    pub outcomes: Vec<ScanOutcome>,

    /// Files matching the allow-list at enumeration time
    pub files_scanned: usize,

    /// True when the scan was cancelled before all files completed
    pub cancelled: bool,
}

impl ScanReport {
    pub fn quarantined_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ScanOutcome::Quarantined { .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ScanOutcome::Failed { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_lines() {
        let quarantined = ScanOutcome::Quarantined {
            file_name: "a.mp3".to_string(),
            metrics: LoudnessMetrics {
                avg_loudness_db: -60.0,
                rms_mean: 0.0001,
                rms_var: 0.00001,
            },
        };
        assert_eq!(
            quarantined.report_line().unwrap(),
            "a.mp3 (Silent, -60.0 dB, RMS 0.000100, Var 0.000010)"
        );

        let failed = ScanOutcome::Failed {
            file_name: "b.ogg".to_string(),
            reason: "corrupt".to_string(),
        };
        assert_eq!(failed.report_line().unwrap(), "b.ogg (Error)");

        let kept = ScanOutcome::Kept {
            file_name: "c.wav".to_string(),
        };
        assert!(kept.report_line().is_none());
    }
}
