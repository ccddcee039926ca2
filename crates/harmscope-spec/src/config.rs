//! Sampling configuration for the synthetic ADC capture.
//!
//! The defaults reproduce a 12-bit differential ADC with a ±500 V input range
//! sampling a 50 Hz mains waveform: 4000 samples/s, 0.1221 V per step and up
//! to 3 LSB of random error per sample.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ValidationResult};
use crate::validation::validate_config;

/// Largest accepted `window_length`, in samples.
///
/// Keeps every per-run buffer (one per component plus the transform's
/// complex buffers) well inside addressable memory.
pub const MAX_WINDOW_LENGTH: usize = 1 << 24;

/// ADC and signal parameters for one analysis pipeline.
///
/// Every field has a default, so a JSON document only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SamplingConfig {
    /// Samples per second.
    #[serde(default = "default_sampling_rate_hz")]
    pub sampling_rate_hz: u32,
    /// Fundamental frequency in Hz.
    #[serde(default = "default_fundamental_hz")]
    pub fundamental_hz: u32,
    /// Number of samples analyzed per run.
    #[serde(default = "default_window_length")]
    pub window_length: usize,
    /// Volts per quantization level.
    #[serde(default = "default_step_size_v")]
    pub step_size_v: f64,
    /// Largest random error per sample, in whole steps.
    #[serde(default = "default_max_lsb_error")]
    pub max_lsb_error: u32,
    /// Peak amplitude of the fundamental in volts.
    #[serde(default = "default_fundamental_amplitude_v")]
    pub fundamental_amplitude_v: f64,
    /// Harmonic order (2 = second harmonic) to amplitude as a percentage of
    /// the fundamental.
    #[serde(default = "default_harmonics")]
    pub harmonics: BTreeMap<u32, u8>,
}

fn default_sampling_rate_hz() -> u32 {
    4000
}

fn default_fundamental_hz() -> u32 {
    50
}

fn default_window_length() -> usize {
    800
}

fn default_step_size_v() -> f64 {
    // 500 V over 12 bits
    0.1221
}

fn default_max_lsb_error() -> u32 {
    3
}

fn default_fundamental_amplitude_v() -> f64 {
    315.0
}

fn default_harmonics() -> BTreeMap<u32, u8> {
    BTreeMap::from([(2, 50), (4, 25), (5, 10), (39, 5), (40, 10)])
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            sampling_rate_hz: default_sampling_rate_hz(),
            fundamental_hz: default_fundamental_hz(),
            window_length: default_window_length(),
            step_size_v: default_step_size_v(),
            max_lsb_error: default_max_lsb_error(),
            fundamental_amplitude_v: default_fundamental_amplitude_v(),
            harmonics: default_harmonics(),
        }
    }
}

/// One sinusoidal component of the synthetic signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicComponent {
    /// Multiple of the fundamental frequency (1 = fundamental).
    pub order: u32,
    /// Peak amplitude in volts.
    pub amplitude_v: f64,
}

impl SamplingConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates the configuration invariants.
    pub fn validate(&self) -> ValidationResult {
        validate_config(self)
    }

    /// Samples in one period of the fundamental.
    ///
    /// Only meaningful once [`validate`](Self::validate) has passed.
    pub fn samples_per_cycle(&self) -> u32 {
        self.sampling_rate_hz / self.fundamental_hz
    }

    /// Magnitude a spectral peak must exceed to be told apart from
    /// quantization noise.
    pub fn noise_threshold_v(&self) -> f64 {
        self.step_size_v * f64::from(self.max_lsb_error)
    }

    /// Frequency spacing between adjacent transform bins.
    pub fn bin_resolution_hz(&self) -> f64 {
        f64::from(self.sampling_rate_hz) / self.window_length as f64
    }

    /// Half the sampling rate.
    pub fn nyquist_hz(&self) -> f64 {
        f64::from(self.sampling_rate_hz) / 2.0
    }

    /// The fundamental followed by every configured harmonic, in ascending
    /// order, with percentages resolved to volts.
    pub fn components(&self) -> Vec<HarmonicComponent> {
        let mut components = Vec::with_capacity(self.harmonics.len() + 1);
        components.push(HarmonicComponent {
            order: 1,
            amplitude_v: self.fundamental_amplitude_v,
        });
        components.extend(self.harmonics.iter().map(|(&order, &percent)| {
            HarmonicComponent {
                order,
                amplitude_v: self.fundamental_amplitude_v * f64::from(percent) / 100.0,
            }
        }));
        components
    }
}
