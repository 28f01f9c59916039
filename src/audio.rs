//! WAV decoding for the model-pipeline provider.
//!
//! Decodes an uploaded file into the raw samples handed to the speech
//! model: 16 kHz, 16-bit PCM, mono, normalized to `[-1.0, 1.0]`. Intake
//! never calls this; only providers touch file contents.

use std::path::Path;

use crate::error::PlaybackError;

const EXPECTED_SPEC: hound::WavSpec = hound::WavSpec {
    channels: 1,
    sample_rate: 16_000,
    bits_per_sample: 16,
    sample_format: hound::SampleFormat::Int,
};

/// Read a WAV file and return normalized f32 samples.
///
/// Fails with [`PlaybackError`] when the file cannot be opened or does
/// not match the 16 kHz / 16-bit / mono contract.
pub fn read_wav_samples(wav_path: &Path) -> Result<Vec<f32>, PlaybackError> {
    let mut reader = hound::WavReader::open(wav_path)
        .map_err(|e| PlaybackError(format!("{}: {e}", wav_path.display())))?;
    let spec = reader.spec();

    if spec != EXPECTED_SPEC {
        return Err(PlaybackError(format!(
            "format WAV inattendu: {} canaux, {} Hz, {} bits (attendu: mono, 16000 Hz, 16 bits PCM)",
            spec.channels, spec.sample_rate, spec.bits_per_sample
        )));
    }

    reader
        .samples::<i16>()
        .map(|sample| {
            sample
                .map(|s| s as f32 / i16::MAX as f32)
                .map_err(|e| PlaybackError(e.to_string()))
        })
        .collect()
}
