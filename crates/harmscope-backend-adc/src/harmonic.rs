//! Per-component waveform generation.
//!
//! Each component is sampled on the phase grid of the fundamental: sample
//! `k` sits at `(k mod samples_per_cycle) / samples_per_cycle` of a
//! fundamental period, so the waveform stays phase-continuous across as many
//! fundamental cycles as the window spans.

use harmscope_spec::SamplingConfig;

use crate::noise::NoiseSource;
use crate::quantize::quantize;

/// One window of sampled values for a single component.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSequence {
    samples: Vec<f64>,
}

impl SampleSequence {
    /// Sampled amplitudes in volts.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the sequence holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl From<Vec<f64>> for SampleSequence {
    fn from(samples: Vec<f64>) -> Self {
        Self { samples }
    }
}

/// Generates sampled sinusoids with injected LSB error.
#[derive(Debug, Clone)]
pub struct HarmonicGenerator {
    samples_per_cycle: u32,
    step_size_v: f64,
    max_lsb_error: u32,
}

impl HarmonicGenerator {
    /// Creates a generator for a validated configuration.
    pub fn new(config: &SamplingConfig) -> Self {
        Self {
            samples_per_cycle: config.samples_per_cycle(),
            step_size_v: config.step_size_v,
            max_lsb_error: config.max_lsb_error,
        }
    }

    /// Samples in one period of the fundamental.
    pub fn samples_per_cycle(&self) -> u32 {
        self.samples_per_cycle
    }

    /// The noise-free value of sample `index`.
    pub fn exact_sample(&self, amplitude: f64, harmonic_order: u32, index: usize) -> f64 {
        let cycle = self.samples_per_cycle as usize;
        let phase_index = (index % cycle) as f64;
        let degrees = phase_index * 360.0 / cycle as f64;
        amplitude * (f64::from(harmonic_order) * degrees.to_radians()).sin()
    }

    /// Generates `window_length` samples of one component.
    ///
    /// Each sample is the exact sinusoid value plus `step_size * e`, where `e`
    /// is drawn from `noise` in `[-max_lsb_error, +max_lsb_error]`.
    ///
    /// The exact value is quantized to the ADC step but the quantized level
    /// is not substituted: the noise is added to the unquantized value.
    pub fn generate<N: NoiseSource + ?Sized>(
        &self,
        amplitude: f64,
        harmonic_order: u32,
        window_length: usize,
        noise: &mut N,
    ) -> SampleSequence {
        let mut samples = Vec::with_capacity(window_length);

        for index in 0..window_length {
            let value = self.exact_sample(amplitude, harmonic_order, index);

            // Resolution only; the working value stays exact.
            let _adc_level = quantize(value, self.step_size_v);

            let lsb = noise.lsb_error(self.max_lsb_error);
            samples.push(value + self.step_size_v * lsb as f64);
        }

        SampleSequence { samples }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{PcgNoise, SilentNoise};

    fn generator() -> HarmonicGenerator {
        HarmonicGenerator::new(&SamplingConfig::default())
    }

    #[test]
    fn test_length_matches_window() {
        let gen = generator();
        for window in [1, 79, 80, 81, 800, 1000] {
            let seq = gen.generate(315.0, 1, window, &mut SilentNoise);
            assert_eq!(seq.len(), window);
        }
    }

    #[test]
    fn test_noise_free_samples_bounded_by_amplitude() {
        let gen = generator();
        let seq = gen.generate(157.5, 2, 800, &mut SilentNoise);
        assert!(seq.samples().iter().all(|s| s.abs() <= 157.5 + 1e-9));
    }

    #[test]
    fn test_fundamental_phase_grid() {
        let gen = generator();
        let seq = gen.generate(1.0, 1, 80, &mut SilentNoise);
        assert_eq!(seq.samples()[0], 0.0);
        // Quarter cycle of an 80-sample period
        assert!((seq.samples()[20] - 1.0).abs() < 1e-12);
        assert!((seq.samples()[60] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_period_is_cycle_over_order() {
        let gen = generator();
        let order = 4;
        let period = gen.samples_per_cycle() as usize / order as usize;
        let seq = gen.generate(78.75, order, 800, &mut SilentNoise);
        let samples = seq.samples();

        for i in 0..samples.len() - period {
            assert!(
                (samples[i] - samples[i + period]).abs() < 1e-9,
                "sample {} differs from sample {}",
                i,
                i + period
            );
        }
    }

    #[test]
    fn test_wraps_continuously_across_cycles() {
        let gen = generator();
        let seq = gen.generate(315.0, 1, 240, &mut SilentNoise);
        let samples = seq.samples();
        assert!((samples[80] - samples[0]).abs() < 1e-12);
        assert!((samples[161] - samples[1]).abs() < 1e-12);
    }

    #[test]
    fn test_zero_amplitude_is_noise_only() {
        let config = SamplingConfig::default();
        let gen = HarmonicGenerator::new(&config);
        let seq = gen.generate(0.0, 3, 800, &mut PcgNoise::from_seed(9));

        let limit = config.noise_threshold_v() + 1e-9;
        assert!(seq.samples().iter().all(|s| s.abs() <= limit));
        for s in seq.samples() {
            let steps = s / config.step_size_v;
            assert!((steps - steps.round()).abs() < 1e-9);
        }
        assert!(seq.samples().iter().any(|s| *s != 0.0));
    }

    #[test]
    fn test_noise_bounded_by_max_lsb_error() {
        let config = SamplingConfig::default();
        let gen = HarmonicGenerator::new(&config);
        let noisy = gen.generate(315.0, 1, 800, &mut PcgNoise::from_seed(3));
        let clean = gen.generate(315.0, 1, 800, &mut SilentNoise);

        for (n, c) in noisy.samples().iter().zip(clean.samples()) {
            assert!((n - c).abs() <= config.noise_threshold_v() + 1e-9);
        }
    }

    #[test]
    fn test_quantization_does_not_alter_output() {
        let gen = generator();
        let seq = gen.generate(1.0, 1, 80, &mut SilentNoise);
        // sin(81 deg) = 0.9877 lies between steps yet survives unrounded.
        let expected = (18.0f64 * 360.0 / 80.0).to_radians().sin();
        assert_eq!(seq.samples()[18], expected);
    }
}
