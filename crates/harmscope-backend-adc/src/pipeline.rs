//! End-to-end driver: synthesize, combine, transform, extract.

use harmscope_spec::{SamplingConfig, ValidationWarning};

use crate::capture::capture_hash;
use crate::composite::{combine, CompositeWaveform};
use crate::error::{AdcError, AdcResult};
use crate::harmonic::{HarmonicGenerator, SampleSequence};
use crate::noise::NoiseSource;
use crate::peaks::{PeakExtractor, PeakMap, Spectrum};
use crate::spectral::transform;

/// Everything one analysis run produced.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// The synthetic ADC capture.
    pub waveform: CompositeWaveform,
    /// Every scanned bin, unfiltered.
    pub spectrum: Spectrum,
    /// Bins above the noise threshold.
    pub peaks: PeakMap,
    /// BLAKE3 fingerprint of the capture.
    pub capture_hash: String,
}

/// A validated, reusable analysis pipeline.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: SamplingConfig,
    warnings: Vec<ValidationWarning>,
    generator: HarmonicGenerator,
    extractor: PeakExtractor,
}

impl Pipeline {
    /// Validates `config` and builds the pipeline.
    ///
    /// Invariant violations are rejected here rather than discovered
    /// mid-run. Warnings are logged and kept on the pipeline.
    pub fn new(config: SamplingConfig) -> AdcResult<Self> {
        let warnings = config
            .validate()
            .into_result()
            .map_err(|errors| AdcError::InvalidConfig { errors })?;

        for warning in &warnings {
            tracing::warn!(code = %warning.code, "{}", warning.message);
        }

        Ok(Self {
            generator: HarmonicGenerator::new(&config),
            extractor: PeakExtractor::from_config(&config),
            config,
            warnings,
        })
    }

    /// The configuration this pipeline was built from.
    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// Validation warnings raised at construction.
    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    /// Generates every component and combines them into one capture.
    ///
    /// Components are drawn from `noise` in order: the fundamental first,
    /// then harmonics by ascending order.
    pub fn synthesize<N: NoiseSource + ?Sized>(&self, noise: &mut N) -> CompositeWaveform {
        let window = self.config.window_length;
        let sequences: Vec<SampleSequence> = self
            .config
            .components()
            .iter()
            .map(|c| {
                tracing::debug!(
                    order = c.order,
                    amplitude_v = c.amplitude_v,
                    "generating component"
                );
                self.generator.generate(c.amplitude_v, c.order, window, &mut *noise)
            })
            .collect();

        combine(&sequences, window)
    }

    /// Runs the full pipeline once.
    ///
    /// # Errors
    /// Returns [`AdcError::TransformAllocation`] if the transform cannot
    /// allocate its buffers. The run is abandoned; nothing is retried.
    pub fn run<N: NoiseSource + ?Sized>(&self, noise: &mut N) -> AdcResult<Analysis> {
        let window = self.config.window_length;

        let waveform = self.synthesize(noise);
        let coefficients = transform(&waveform)?;
        let spectrum = self.extractor.spectrum(&coefficients, window);
        let peaks = spectrum.above(self.extractor.threshold_v());

        tracing::debug!(
            samples = waveform.len(),
            bins = spectrum.len(),
            peaks = peaks.len(),
            threshold_v = self.extractor.threshold_v(),
            "analysis complete"
        );

        Ok(Analysis {
            capture_hash: capture_hash(&waveform),
            waveform,
            spectrum,
            peaks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{PcgNoise, SilentNoise};
    use harmscope_spec::{ErrorCode, WarningCode};
    use std::collections::BTreeMap;

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let config = SamplingConfig {
            fundamental_hz: 60,
            ..SamplingConfig::default()
        };
        match Pipeline::new(config) {
            Err(AdcError::InvalidConfig { errors }) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].code, ErrorCode::NonIntegralCycle);
            }
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_oversized_window_rejected_before_any_allocation() {
        let config = SamplingConfig {
            window_length: usize::MAX / 4,
            ..SamplingConfig::default()
        };
        match Pipeline::new(config) {
            Err(AdcError::InvalidConfig { errors }) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].code, ErrorCode::WindowTooLong);
            }
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_largest_window_accepted() {
        let config = SamplingConfig {
            window_length: harmscope_spec::MAX_WINDOW_LENGTH,
            ..SamplingConfig::default()
        };
        assert!(Pipeline::new(config).is_ok());
    }

    #[test]
    fn test_warnings_kept() {
        let pipeline = Pipeline::new(SamplingConfig::default()).unwrap();
        assert_eq!(pipeline.warnings().len(), 1);
        assert_eq!(pipeline.warnings()[0].code, WarningCode::AboveNyquist);
    }

    #[test]
    fn test_capture_length_matches_window() {
        let pipeline = Pipeline::new(SamplingConfig::default()).unwrap();
        let analysis = pipeline.run(&mut PcgNoise::from_seed(1)).unwrap();
        assert_eq!(analysis.waveform.len(), 800);
        assert_eq!(analysis.spectrum.len(), 399);
    }

    #[test]
    fn test_same_seed_same_capture() {
        let pipeline = Pipeline::new(SamplingConfig::default()).unwrap();
        let a = pipeline.run(&mut PcgNoise::from_seed(42)).unwrap();
        let b = pipeline.run(&mut PcgNoise::from_seed(42)).unwrap();
        let c = pipeline.run(&mut PcgNoise::from_seed(43)).unwrap();

        assert_eq!(a.capture_hash, b.capture_hash);
        assert_eq!(a.waveform, b.waveform);
        assert_ne!(a.capture_hash, c.capture_hash);
    }

    #[test]
    fn test_peaks_are_spectrum_above_threshold() {
        let pipeline = Pipeline::new(SamplingConfig::default()).unwrap();
        let analysis = pipeline.run(&mut PcgNoise::from_seed(5)).unwrap();
        let threshold = pipeline.config().noise_threshold_v();

        let expected: Vec<usize> = analysis
            .spectrum
            .bins()
            .iter()
            .filter(|b| b.magnitude_v > threshold)
            .map(|b| b.bin)
            .collect();
        let actual: Vec<usize> = analysis.peaks.iter().map(|p| p.bin).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_works_through_trait_object() {
        let config = SamplingConfig {
            harmonics: BTreeMap::new(),
            ..SamplingConfig::default()
        };
        let pipeline = Pipeline::new(config).unwrap();
        let noise: &mut dyn NoiseSource = &mut SilentNoise;
        let analysis = pipeline.run(noise).unwrap();
        assert_eq!(analysis.peaks.frequencies(), vec![50.0]);
    }
}
