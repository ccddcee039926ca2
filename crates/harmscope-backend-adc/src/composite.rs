//! Superposition of component waveforms into one capture.

use serde::Serialize;

use crate::harmonic::SampleSequence;

/// Decimal scale for capture rounding (4 digits).
const ROUNDING_SCALE: f64 = 10_000.0;

/// The synthetic ADC capture: the sample-wise sum of every component.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CompositeWaveform {
    samples: Vec<f64>,
}

impl CompositeWaveform {
    /// Captured amplitudes in volts.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the capture holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Largest absolute sample value.
    pub fn peak_abs(&self) -> f64 {
        self.samples.iter().fold(0.0, |acc, s| acc.max(s.abs()))
    }
}

/// Rounds to 4 decimal digits, half away from zero.
fn round_to_scale(value: f64) -> f64 {
    (value * ROUNDING_SCALE).round() / ROUNDING_SCALE
}

/// Sums `sequences` sample by sample into a capture of `window_length`
/// samples, rounding each sum to 4 decimal digits.
///
/// # Panics
/// Panics if any sequence is shorter than `window_length`. Samples beyond
/// the window are ignored.
pub fn combine(sequences: &[SampleSequence], window_length: usize) -> CompositeWaveform {
    for (i, seq) in sequences.iter().enumerate() {
        assert!(
            seq.len() >= window_length,
            "sequence {} has {} samples, window needs {}",
            i,
            seq.len(),
            window_length
        );
    }

    let samples = (0..window_length)
        .map(|index| {
            let sum: f64 = sequences.iter().map(|seq| seq.samples()[index]).sum();
            round_to_scale(sum)
        })
        .collect();

    CompositeWaveform { samples }
}

impl From<Vec<f64>> for CompositeWaveform {
    fn from(samples: Vec<f64>) -> Self {
        Self { samples }
    }
}
