//! Capture fingerprinting and WAV export.

use std::path::Path;

use crate::composite::CompositeWaveform;
use crate::error::AdcResult;

/// BLAKE3 hash of the capture's samples (little-endian f64), as hex.
///
/// Two runs with the same configuration and seed produce the same hash.
pub fn capture_hash(waveform: &CompositeWaveform) -> String {
    let mut hasher = blake3::Hasher::new();
    for sample in waveform.samples() {
        hasher.update(&sample.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

/// Writes the capture as a mono 32-bit float WAV file.
///
/// Samples are stored in volts, unscaled; most audio tools will show them
/// clipped, but the values round-trip exactly through a WAV reader.
pub fn write_capture_wav(
    path: impl AsRef<Path>,
    waveform: &CompositeWaveform,
    sampling_rate_hz: u32,
) -> AdcResult<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: sampling_rate_hz,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = hound::WavWriter::create(path.as_ref(), spec)?;
    for &sample in waveform.samples() {
        writer.write_sample(sample as f32)?;
    }
    writer.finalize()?;

    tracing::debug!(
        path = %path.as_ref().display(),
        samples = waveform.len(),
        "capture written"
    );
    Ok(())
}
