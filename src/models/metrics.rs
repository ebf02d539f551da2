//! Loudness metrics and classification thresholds

use serde::{Deserialize, Serialize};

/// Loudness statistics for one decoded file
///
/// Derived deterministically from the sample sequence; immutable once
/// computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoudnessMetrics {
    /// Mean loudness in decibels (dBFS, reference amplitude 1.0)
    pub avg_loudness_db: f64,

    /// Arithmetic mean of the frame RMS envelope (>= 0)
    pub rms_mean: f64,

    /// Population variance of the frame RMS envelope (>= 0)
    pub rms_var: f64,
}

impl LoudnessMetrics {
    /// Format as used in quarantine report lines and notices.
    pub fn summary(&self) -> String {
        format!(
            "Silent, {:.1} dB, RMS {:.6}, Var {:.6}",
            self.avg_loudness_db, self.rms_mean, self.rms_var
        )
    }
}

/// Threshold constants defining the silence boundary
///
/// A file is classified silent only when all three metrics fall below their
/// thresholds. Defaults target basically-silent / whisper-level tracks while
/// leaving quiet-but-intentional passages (ambient intros, fade-outs) alone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationThresholds {
    /// Mean loudness ceiling in dB (default: -45.0)
    #[serde(default = "default_db_threshold")]
    pub db_threshold: f64,

    /// RMS mean ceiling (default: 0.003)
    #[serde(default = "default_rms_threshold")]
    pub rms_threshold: f64,

    /// RMS variance ceiling (default: 0.0005)
    #[serde(default = "default_var_threshold")]
    pub var_threshold: f64,
}

fn default_db_threshold() -> f64 {
    -45.0
}

fn default_rms_threshold() -> f64 {
    0.003
}

fn default_var_threshold() -> f64 {
    0.0005
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            db_threshold: default_db_threshold(),
            rms_threshold: default_rms_threshold(),
            var_threshold: default_var_threshold(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let t = ClassificationThresholds::default();
        assert_eq!(t.db_threshold, -45.0);
        assert_eq!(t.rms_threshold, 0.003);
        assert_eq!(t.var_threshold, 0.0005);
    }

    #[test]
    fn test_metrics_summary_formatting() {
        let m = LoudnessMetrics {
            avg_loudness_db: -51.2345,
            rms_mean: 0.0012345678,
            rms_var: 0.0000123456,
        };
        assert_eq!(m.summary(), "Silent, -51.2 dB, RMS 0.001235, Var 0.000012");
    }
}
