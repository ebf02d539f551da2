//! Loudness feature extraction
//!
//! Computes the three statistics the silence rule consumes: mean loudness
//! in dB, mean of the frame RMS envelope, and population variance of the
//! envelope. Pure functions over the sample slice; identical input yields
//! identical output.

use crate::models::LoudnessMetrics;

/// RMS frame length in samples
const FRAME_LENGTH: usize = 2048;

/// Hop between successive frames in samples
const HOP_LENGTH: usize = 512;

/// Amplitude floor for the dB conversion (-100 dB), avoids log10(0)
const AMPLITUDE_FLOOR: f64 = 1e-5;

/// Compute loudness metrics from a mono sample sequence
///
/// The envelope is framed with a 2048-sample window and 512-sample hop; a
/// trailing partial frame is included. Empty or all-zero input resolves to
/// exactly -100.0 dB via the amplitude floor rather than a domain error.
pub fn compute_metrics(samples: &[f32]) -> LoudnessMetrics {
    let envelope = rms_envelope(samples, FRAME_LENGTH, HOP_LENGTH);

    let rms_mean = mean(&envelope);
    let rms_var = population_variance(&envelope, rms_mean);
    let avg_loudness_db = amplitude_to_db(rms_mean);

    LoudnessMetrics {
        avg_loudness_db,
        rms_mean,
        rms_var,
    }
}

/// Frame-wise RMS envelope
fn rms_envelope(samples: &[f32], frame_length: usize, hop_length: usize) -> Vec<f64> {
    if samples.is_empty() {
        return Vec::new();
    }

    let mut envelope = Vec::with_capacity(samples.len() / hop_length + 1);
    let mut start = 0;

    while start < samples.len() {
        let end = (start + frame_length).min(samples.len());
        envelope.push(rms(&samples[start..end]));
        start += hop_length;
    }

    envelope
}

/// RMS (root-mean-square) of one frame
fn rms(frame: &[f32]) -> f64 {
    if frame.is_empty() {
        return 0.0;
    }

    let sum_squares: f64 = frame.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum_squares / frame.len() as f64).sqrt()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_variance(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / values.len() as f64
}

/// Convert a linear amplitude to dB relative to full scale (reference 1.0)
fn amplitude_to_db(amplitude: f64) -> f64 {
    20.0 * amplitude.max(AMPLITUDE_FLOOR).log10()
}
