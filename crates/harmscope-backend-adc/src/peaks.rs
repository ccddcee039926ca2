//! Magnitude spectrum and peak extraction.
//!
//! Only bins `1..N/2` are scanned: bin 0 is DC and the upper half mirrors
//! the lower half for a real-valued capture. Magnitudes are normalized by `N`
//! and doubled to fold the negative-frequency half back in, so a sinusoid of
//! amplitude `A` reads as `A` volts.

use std::collections::BTreeMap;

use harmscope_spec::SamplingConfig;
use rustfft::num_complex::Complex;
use serde::{Serialize, Serializer};

/// Single-sided amplitude of one bin, in volts.
pub fn bin_magnitude(coefficient: &Complex<f64>, window_length: usize) -> f64 {
    let n = window_length as f64;
    ((coefficient.re / n).powi(2) + (coefficient.im / n).powi(2)).sqrt() * 2.0
}

/// Physical frequency of a bin, in Hz.
pub fn bin_frequency(bin: usize, sampling_rate_hz: u32, window_length: usize) -> f64 {
    f64::from(sampling_rate_hz) * bin as f64 / window_length as f64
}

/// One scanned frequency bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Peak {
    /// Transform bin index.
    pub bin: usize,
    /// Bin frequency in Hz.
    pub frequency_hz: f64,
    /// Single-sided magnitude in volts.
    pub magnitude_v: f64,
}

/// Every scanned bin of one transform, in ascending frequency.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Spectrum {
    bins: Vec<Peak>,
}

impl Spectrum {
    /// Scanned bins in ascending frequency.
    pub fn bins(&self) -> &[Peak] {
        &self.bins
    }

    /// Number of scanned bins.
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Returns true if no bin was scanned.
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Bins whose magnitude strictly exceeds `threshold_v`.
    pub fn above(&self, threshold_v: f64) -> PeakMap {
        let peaks = self
            .bins
            .iter()
            .filter(|bin| bin.magnitude_v > threshold_v)
            .map(|bin| (bin.bin, *bin))
            .collect();
        PeakMap { peaks }
    }

    /// The bin with the largest magnitude.
    pub fn strongest(&self) -> Option<&Peak> {
        self.bins
            .iter()
            .max_by(|a, b| a.magnitude_v.total_cmp(&b.magnitude_v))
    }
}

/// Frequency to magnitude for every bin above the noise floor.
///
/// Keys are derived from bin indices, so no two entries share a frequency.
/// Iteration is in ascending frequency.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeakMap {
    peaks: BTreeMap<usize, Peak>,
}

impl PeakMap {
    /// Number of peaks.
    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    /// Returns true if nothing rose above the noise floor.
    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    /// Peaks in ascending frequency.
    pub fn iter(&self) -> impl Iterator<Item = &Peak> {
        self.peaks.values()
    }

    /// Peak frequencies in ascending order.
    pub fn frequencies(&self) -> Vec<f64> {
        self.iter().map(|p| p.frequency_hz).collect()
    }

    /// Magnitude of the peak at `frequency_hz`, if one was retained.
    pub fn magnitude_at(&self, frequency_hz: f64) -> Option<f64> {
        self.iter()
            .find(|p| (p.frequency_hz - frequency_hz).abs() < 1e-9)
            .map(|p| p.magnitude_v)
    }
}

impl Serialize for PeakMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.peaks.values())
    }
}

/// Converts transform output into magnitudes at physical frequencies.
#[derive(Debug, Clone, Copy)]
pub struct PeakExtractor {
    sampling_rate_hz: u32,
    threshold_v: f64,
}

impl PeakExtractor {
    /// Creates an extractor with an explicit noise threshold.
    pub fn new(sampling_rate_hz: u32, threshold_v: f64) -> Self {
        Self {
            sampling_rate_hz,
            threshold_v,
        }
    }

    /// Creates an extractor whose threshold is the largest possible
    /// quantization error, `step_size * max_lsb_error`.
    pub fn from_config(config: &SamplingConfig) -> Self {
        Self::new(config.sampling_rate_hz, config.noise_threshold_v())
    }

    /// The noise threshold in volts.
    pub fn threshold_v(&self) -> f64 {
        self.threshold_v
    }

    /// Scans bins `1..window_length / 2` without filtering.
    ///
    /// # Panics
    /// Panics if fewer than `window_length / 2` coefficients are supplied.
    pub fn spectrum(&self, coefficients: &[Complex<f64>], window_length: usize) -> Spectrum {
        let half = window_length / 2;
        assert!(
            coefficients.len() >= half,
            "{} coefficients supplied for a {}-sample window",
            coefficients.len(),
            window_length
        );

        let bins = (1..half)
            .map(|bin| Peak {
                bin,
                frequency_hz: bin_frequency(bin, self.sampling_rate_hz, window_length),
                magnitude_v: bin_magnitude(&coefficients[bin], window_length),
            })
            .collect();

        Spectrum { bins }
    }

    /// Bins whose magnitude strictly exceeds the noise threshold.
    pub fn extract(&self, coefficients: &[Complex<f64>], window_length: usize) -> PeakMap {
        self.spectrum(coefficients, window_length)
            .above(self.threshold_v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    /// Coefficients whose bin `k` reads as `magnitudes[k]` volts.
    fn coefficients_for(magnitudes: &[f64], window_length: usize) -> Vec<Complex<f64>> {
        let mut coefficients = vec![Complex::new(0.0, 0.0); window_length];
        for (bin, &m) in magnitudes.iter().enumerate() {
            coefficients[bin] = Complex::new(0.0, -m * window_length as f64 / 2.0);
        }
        coefficients
    }

    #[test]
    fn test_bin_magnitude_scaling() {
        let c = Complex::new(3.0 * 400.0, 4.0 * 400.0);
        assert!((bin_magnitude(&c, 800) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_bin_frequency() {
        assert_eq!(bin_frequency(10, 4000, 800), 50.0);
        assert_eq!(bin_frequency(1, 1000, 3), 1000.0 / 3.0);
    }

    #[test]
    fn test_dc_and_upper_half_excluded() {
        let mut magnitudes = vec![0.0; 8];
        magnitudes[0] = 100.0;
        magnitudes[4] = 100.0;
        magnitudes[6] = 100.0;
        magnitudes[3] = 1.0;
        let coefficients = coefficients_for(&magnitudes, 8);

        let extractor = PeakExtractor::new(8, 0.5);
        let spectrum = extractor.spectrum(&coefficients, 8);
        assert_eq!(
            spectrum.bins().iter().map(|b| b.bin).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );

        let peaks = extractor.extract(&coefficients, 8);
        assert_eq!(peaks.frequencies(), vec![3.0]);
    }

    #[test]
    fn test_threshold_is_strict() {
        let threshold = 0.1221 * 3.0;
        let coefficients = coefficients_for(&[0.0, threshold, threshold * 1.0001], 16);
        let peaks = PeakExtractor::new(16, threshold).extract(&coefficients, 16);

        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks.iter().next().unwrap().bin, 2);
    }

    #[test]
    fn test_from_config_uses_noise_threshold() {
        let config = SamplingConfig::default();
        let extractor = PeakExtractor::from_config(&config);
        assert!((extractor.threshold_v() - 0.3663).abs() < 1e-12);
    }

    #[test]
    fn test_magnitude_lookup_and_order() {
        let coefficients = coefficients_for(&[0.0, 0.0, 5.0, 0.0, 2.0], 40);
        let peaks = PeakExtractor::new(4000, 1.0).extract(&coefficients, 40);

        assert_eq!(peaks.frequencies(), vec![200.0, 400.0]);
        assert!((peaks.magnitude_at(200.0).unwrap() - 5.0).abs() < 1e-12);
        assert!(peaks.magnitude_at(300.0).is_none());
    }

    #[test]
    fn test_strongest_bin() {
        let coefficients = coefficients_for(&[0.0, 1.0, 7.0, 3.0], 10);
        let spectrum = PeakExtractor::new(10, 0.0).spectrum(&coefficients, 10);
        assert_eq!(spectrum.strongest().unwrap().bin, 2);
    }

    #[test]
    fn test_peak_map_serializes_as_list() {
        let coefficients = coefficients_for(&[0.0, 2.0], 4);
        let peaks = PeakExtractor::new(4, 1.0).extract(&coefficients, 4);
        let json = serde_json::to_value(&peaks).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "bin": 1, "frequency_hz": 1.0, "magnitude_v": 2.0 }])
        );
    }

    proptest! {
        #[test]
        fn retained_peaks_exceed_threshold_and_sit_on_bins(
            magnitudes in prop::collection::vec(0.0f64..2.0, 32),
            threshold in 0.0f64..1.5,
        ) {
            let window = 64;
            let coefficients = coefficients_for(&magnitudes, window);
            let peaks = PeakExtractor::new(4000, threshold).extract(&coefficients, window);

            for peak in peaks.iter() {
                prop_assert!(peak.magnitude_v > threshold);
                prop_assert!(peak.bin >= 1 && peak.bin < window / 2);
                prop_assert_eq!(peak.frequency_hz, bin_frequency(peak.bin, 4000, window));
            }
        }
    }
}
