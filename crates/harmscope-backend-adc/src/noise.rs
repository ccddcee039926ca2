//! LSB error sources.
//!
//! Every random draw in the backend goes through [`NoiseSource`], which the
//! caller owns and passes in. A single source is advanced by every harmonic
//! generated in a run, so two runs from the same seed produce the same
//! capture. Concurrent runs must each own their own source.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// A uniform integer source for per-sample ADC error.
pub trait NoiseSource {
    /// Draws an LSB error uniformly from `[-max_lsb_error, +max_lsb_error]`.
    fn lsb_error(&mut self, max_lsb_error: u32) -> i64;
}

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The 32-bit seed is expanded to 64 bits by duplicating the value in both
/// halves, as required by PCG32's state initialization.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// PCG32-backed noise.
#[derive(Debug, Clone)]
pub struct PcgNoise {
    rng: Pcg32,
    seed: u32,
}

impl PcgNoise {
    /// Creates a deterministic source from a seed.
    pub fn from_seed(seed: u32) -> Self {
        Self {
            rng: create_rng(seed),
            seed,
        }
    }

    /// Creates a source seeded from operating-system entropy.
    ///
    /// The drawn seed is kept so the run can be reproduced with
    /// [`from_seed`](Self::from_seed).
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }

    /// The seed this source was created from.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl NoiseSource for PcgNoise {
    fn lsb_error(&mut self, max_lsb_error: u32) -> i64 {
        let max = i64::from(max_lsb_error);
        self.rng.gen_range(-max..=max)
    }
}

/// A source that never injects error.
///
/// Useful for checking recovered magnitudes against exact values while the
/// configured noise threshold stays in force.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNoise;

impl NoiseSource for SilentNoise {
    fn lsb_error(&mut self, _max_lsb_error: u32) -> i64 {
        0
    }
}
