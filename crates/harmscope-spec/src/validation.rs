//! Configuration validation.
//!
//! Violations that would make the pipeline meaningless (empty windows, a
//! fundamental that does not divide the sampling rate) are errors and reject
//! pipeline construction. Settings that merely degrade the result are
//! reported as warnings.

use crate::config::{SamplingConfig, MAX_WINDOW_LENGTH};
use crate::error::{
    ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};

/// Validates a sampling configuration.
///
/// # Example
/// ```
/// use harmscope_spec::{SamplingConfig, ErrorCode};
/// use harmscope_spec::validation::validate_config;
///
/// let config = SamplingConfig { fundamental_hz: 60, ..SamplingConfig::default() };
/// let result = validate_config(&config);
/// assert!(result.has_error(ErrorCode::NonIntegralCycle));
/// ```
pub fn validate_config(config: &SamplingConfig) -> ValidationResult {
    let mut result = ValidationResult::success();

    if config.window_length == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::ZeroWindowLength,
            "window length must be at least 1 sample",
            "window_length",
        ));
    } else if config.window_length > MAX_WINDOW_LENGTH {
        result.add_error(ValidationError::with_path(
            ErrorCode::WindowTooLong,
            format!(
                "window length {} exceeds the maximum of {} samples",
                config.window_length, MAX_WINDOW_LENGTH
            ),
            "window_length",
        ));
    }

    if config.sampling_rate_hz == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::ZeroSamplingRate,
            "sampling rate must be positive",
            "sampling_rate_hz",
        ));
    }

    if config.fundamental_hz == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::ZeroFundamental,
            "fundamental frequency must be positive",
            "fundamental_hz",
        ));
    } else if config.sampling_rate_hz % config.fundamental_hz != 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::NonIntegralCycle,
            format!(
                "sampling rate {} Hz is not a whole multiple of the {} Hz fundamental",
                config.sampling_rate_hz, config.fundamental_hz
            ),
            "fundamental_hz",
        ));
    }

    if !config.step_size_v.is_finite() || config.step_size_v < 0.0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidStepSize,
            format!(
                "step size must be a non-negative number of volts, got {}",
                config.step_size_v
            ),
            "step_size_v",
        ));
    } else if config.step_size_v == 0.0 {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::QuantizationDisabled,
            "step size is zero: quantization and LSB noise have no effect",
            "step_size_v",
        ));
    }

    if !config.fundamental_amplitude_v.is_finite() || config.fundamental_amplitude_v < 0.0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidAmplitude,
            format!(
                "fundamental amplitude must be a non-negative number of volts, got {}",
                config.fundamental_amplitude_v
            ),
            "fundamental_amplitude_v",
        ));
    }

    for (&order, &percent) in &config.harmonics {
        let path = format!("harmonics.{}", order);
        if order == 0 {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidHarmonicOrder,
                "harmonic order must be at least 1",
                path,
            ));
            continue;
        }
        if percent > 100 {
            result.add_error(ValidationError::with_path(
                ErrorCode::PercentageOutOfRange,
                format!("harmonic amplitude must be 0-100 percent, got {}", percent),
                path.clone(),
            ));
        }

        let frequency = f64::from(order) * f64::from(config.fundamental_hz);
        if config.sampling_rate_hz > 0 && frequency >= config.nyquist_hz() {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::AboveNyquist,
                format!(
                    "harmonic {} ({} Hz) is at or above the {} Hz Nyquist limit and will not be recovered",
                    order,
                    frequency,
                    config.nyquist_hz()
                ),
                path,
            ));
        }
    }

    // Only checkable once the cycle length itself is valid.
    if result.is_ok() {
        let cycle = config.samples_per_cycle() as usize;
        if config.window_length % cycle != 0 {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::PartialCycleWindow,
                format!(
                    "window of {} samples is not a whole number of {}-sample cycles; expect spectral leakage",
                    config.window_length, cycle
                ),
                "window_length",
            ));
        }
    }

    result
}
