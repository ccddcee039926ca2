//! Error types for the ADC backend.

use harmscope_spec::ValidationError;
use thiserror::Error;

/// Result type for ADC backend operations.
pub type AdcResult<T> = Result<T, AdcError>;

/// Errors that can occur while building or running a pipeline.
#[derive(Debug, Error)]
pub enum AdcError {
    /// The sampling configuration violates an invariant.
    #[error("invalid sampling config: {}", format_errors(.errors))]
    InvalidConfig {
        /// Every violated invariant.
        errors: Vec<ValidationError>,
    },

    /// The transform could not allocate its working buffers.
    #[error("insufficient memory for a {size}-point FFT")]
    TransformAllocation {
        /// Requested buffer length in complex samples.
        size: usize,
    },

    /// WAV encoding or file error.
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl AdcError {
    /// Stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            AdcError::InvalidConfig { .. } => "ADC_001",
            AdcError::TransformAllocation { .. } => "ADC_002",
            AdcError::Wav(_) => "ADC_003",
        }
    }
}
