//! harmscope ADC Backend
//!
//! This crate synthesizes what an analog-to-digital converter would capture
//! when sampling a distorted periodic signal, then recovers the harmonic
//! content of that capture with a forward FFT.
//!
//! # Overview
//!
//! Data flows strictly forward through four stages:
//!
//! - **Harmonic generation** - one sampled sinusoid per component, with
//!   bounded random LSB error injected per sample
//! - **Composite building** - sample-wise sum of every component, rounded to
//!   4 decimal digits
//! - **Spectral transform** - forward FFT of the real-valued capture
//! - **Peak extraction** - single-sided magnitudes in volts, filtered against
//!   the quantization noise floor
//!
//! # Determinism
//!
//! All randomness flows through a [`noise::NoiseSource`] passed in by the
//! caller. Given the same configuration and seed, a run produces an identical
//! capture; [`Analysis::capture_hash`] fingerprints it with BLAKE3.
//!
//! # Example
//!
//! ```
//! use harmscope_backend_adc::{noise::PcgNoise, Pipeline};
//! use harmscope_spec::SamplingConfig;
//!
//! let pipeline = Pipeline::new(SamplingConfig::default()).unwrap();
//! let analysis = pipeline.run(&mut PcgNoise::from_seed(42)).unwrap();
//!
//! for peak in analysis.peaks.iter() {
//!     println!("{}Hz = {}V", peak.frequency_hz, peak.magnitude_v);
//! }
//! ```
//!
//! # Crate Structure
//!
//! - [`quantize`] - ADC step rounding
//! - [`noise`] - LSB error sources (PCG32, silent)
//! - [`harmonic`] - Per-component waveform generation
//! - [`composite`] - Superposition of components
//! - [`spectral`] - Forward transform staging
//! - [`peaks`] - Magnitude spectrum and peak extraction
//! - [`pipeline`] - End-to-end driver
//! - [`capture`] - Capture fingerprinting and WAV export

pub mod capture;
pub mod composite;
pub mod error;
pub mod harmonic;
pub mod noise;
pub mod peaks;
pub mod pipeline;
pub mod quantize;
pub mod spectral;

// Re-export main types at crate root
pub use composite::CompositeWaveform;
pub use error::{AdcError, AdcResult};
pub use harmonic::{HarmonicGenerator, SampleSequence};
pub use peaks::{Peak, PeakExtractor, PeakMap, Spectrum};
pub use pipeline::{Analysis, Pipeline};
