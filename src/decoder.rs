//! Audio decoding adapter
//!
//! Decodes an audio file to mono f32 PCM samples using symphonia. This is
//! the only module aware of codecs; everything downstream consumes the
//! sample sequence and sample rate. Decode failures are the dominant error
//! source of a scan and are always recoverable per-file.

use std::path::Path;

use symphonia::core::audio::{AudioBuffer, AudioBufferRef, Signal};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::conv::FromSample;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::sample::Sample;

use crate::error::{Result, ScanError};

/// Decoded audio, mixed down to mono
#[derive(Debug)]
pub struct DecodedAudio {
    /// Mono samples (f32, range [-1.0, 1.0])
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Channel count of the source stream
    pub channels: usize,
    /// Duration in seconds
    pub duration_seconds: f64,
}

/// Decode an audio file to mono f32 PCM samples
///
/// Probes the container, decodes every packet of the default audio track,
/// and averages channels to mono. Supported formats follow symphonia's
/// "all" feature set (MP3, WAV, FLAC, OGG, ...).
pub fn decode_audio_file(file_path: &Path) -> Result<DecodedAudio> {
    tracing::debug!(file = %file_path.display(), "Decoding audio file");

    let decode_err = |cause: String| ScanError::Decode {
        path: file_path.to_path_buf(),
        cause,
    };

    let file = std::fs::File::open(file_path)
        .map_err(|e| decode_err(format!("Failed to open file: {}", e)))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(extension) = file_path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(extension);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| decode_err(format!("Unsupported or corrupt format: {}", e)))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| decode_err("No audio track found".to_string()))?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| decode_err("Sample rate unknown".to_string()))?;
    let channels = track
        .codec_params
        .channels
        .ok_or_else(|| decode_err("Channel layout unknown".to_string()))?
        .count();

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| decode_err(format!("Failed to create decoder: {}", e)))?;

    let mut samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(decode_err(format!("Error reading packet: {}", e))),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder
            .decode(&packet)
            .map_err(|e| decode_err(format!("Failed to decode packet: {}", e)))?;

        append_mono(&decoded, &mut samples);
    }

    let duration_seconds = samples.len() as f64 / sample_rate as f64;

    tracing::debug!(
        file = %file_path.display(),
        total_samples = samples.len(),
        sample_rate,
        channels,
        "Decoding complete"
    );

    Ok(DecodedAudio {
        samples,
        sample_rate,
        channels,
        duration_seconds,
    })
}

/// Downmix one decoded buffer to mono and append to `out`
///
/// Multi-channel frames are averaged; mono passes through unchanged.
fn append_mono(decoded: &AudioBufferRef, out: &mut Vec<f32>) {
    fn mix<S>(buf: &AudioBuffer<S>, out: &mut Vec<f32>)
    where
        S: Sample,
        f32: FromSample<S>,
    {
        let num_channels = buf.spec().channels.count();
        let num_frames = buf.frames();
        out.reserve(num_frames);

        for frame_idx in 0..num_frames {
            let mut sum = 0.0f32;
            for ch in 0..num_channels {
                sum += f32::from_sample(buf.chan(ch)[frame_idx]);
            }
            out.push(sum / num_channels as f32);
        }
    }

    match decoded {
        AudioBufferRef::U8(buf) => mix(buf.as_ref(), out),
        AudioBufferRef::U16(buf) => mix(buf.as_ref(), out),
        AudioBufferRef::U24(buf) => mix(buf.as_ref(), out),
        AudioBufferRef::U32(buf) => mix(buf.as_ref(), out),
        AudioBufferRef::S8(buf) => mix(buf.as_ref(), out),
        AudioBufferRef::S16(buf) => mix(buf.as_ref(), out),
        AudioBufferRef::S24(buf) => mix(buf.as_ref(), out),
        AudioBufferRef::S32(buf) => mix(buf.as_ref(), out),
        AudioBufferRef::F32(buf) => mix(buf.as_ref(), out),
        AudioBufferRef::F64(buf) => mix(buf.as_ref(), out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_file_not_found() {
        let result = decode_audio_file(Path::new("/nonexistent/file.mp3"));
        match result {
            Err(ScanError::Decode { cause, .. }) => {
                assert!(cause.contains("Failed to open file"));
            }
            other => panic!("Expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_non_audio_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.flac");
        std::fs::write(&path, b"this is not audio data at all").unwrap();

        let result = decode_audio_file(&path);
        assert!(matches!(result, Err(ScanError::Decode { .. })));
    }
}
