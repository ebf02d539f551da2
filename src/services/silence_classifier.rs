//! Silence classification rule
//!
//! A file is silent only when all three loudness statistics fall below
//! their thresholds. The conjunction keeps false positives down: ambient
//! intros and fade-outs are quiet on one axis but usually fail another.

use crate::models::{ClassificationThresholds, LoudnessMetrics};

/// Apply the silence decision rule
///
/// Pure function, no error conditions.
pub fn is_silent(metrics: &LoudnessMetrics, thresholds: &ClassificationThresholds) -> bool {
    metrics.avg_loudness_db < thresholds.db_threshold
        && metrics.rms_mean < thresholds.rms_threshold
        && metrics.rms_var < thresholds.var_threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(db: f64, rms: f64, var: f64) -> LoudnessMetrics {
        LoudnessMetrics {
            avg_loudness_db: db,
            rms_mean: rms,
            rms_var: var,
        }
    }

    #[test]
    fn test_silent_when_all_axes_pass() {
        let m = metrics(-60.0, 0.0001, 0.00001);
        assert!(is_silent(&m, &ClassificationThresholds::default()));
    }

    #[test]
    fn test_not_silent_when_variance_fails() {
        // db and rms pass, variance alone blocks the verdict
        let m = metrics(-50.0, 0.001, 0.0008);
        assert!(!is_silent(&m, &ClassificationThresholds::default()));
    }

    #[test]
    fn test_not_silent_when_db_fails() {
        let m = metrics(-30.0, 0.001, 0.0001);
        assert!(!is_silent(&m, &ClassificationThresholds::default()));
    }

    #[test]
    fn test_not_silent_when_rms_fails() {
        let m = metrics(-50.0, 0.01, 0.0001);
        assert!(!is_silent(&m, &ClassificationThresholds::default()));
    }

    #[test]
    fn test_boundary_is_exclusive() {
        // Metrics exactly at threshold are not silent (strict less-than)
        let t = ClassificationThresholds::default();
        let m = metrics(t.db_threshold, t.rms_threshold, t.var_threshold);
        assert!(!is_silent(&m, &t));
    }

    #[test]
    fn test_monotonic_in_thresholds() {
        // Raising any single threshold can only flip false -> true
        let m = metrics(-50.0, 0.001, 0.0008);
        let base = ClassificationThresholds::default();
        assert!(!is_silent(&m, &base));

        let relaxed = ClassificationThresholds {
            var_threshold: 0.001,
            ..base
        };
        assert!(is_silent(&m, &relaxed));

        // Tightening a different axis takes the verdict back to false
        let tightened = ClassificationThresholds {
            db_threshold: -70.0,
            ..relaxed
        };
        assert!(!is_silent(&m, &tightened));
    }
}
