//! harmscope Sampling Configuration Library
//!
//! This crate provides the configuration types shared by the harmscope
//! pipeline: the ADC sampling parameters, the harmonic content of the
//! synthetic signal, and the validation rules that must hold before a
//! pipeline can be built.
//!
//! # Example
//!
//! ```
//! use harmscope_spec::{SamplingConfig, validation::validate_config};
//!
//! let config = SamplingConfig::from_json(r#"{ "window_length": 400 }"#).unwrap();
//! assert_eq!(config.window_length, 400);
//! assert_eq!(config.sampling_rate_hz, 4000);
//!
//! let result = validate_config(&config);
//! assert!(result.is_ok());
//! ```
//!
//! # Modules
//!
//! - [`config`]: The sampling configuration and its reference defaults
//! - [`error`]: Error and warning types for validation
//! - [`validation`]: Configuration invariants

pub mod config;
pub mod error;
pub mod validation;

// Re-export commonly used types at the crate root
pub use config::{HarmonicComponent, SamplingConfig, MAX_WINDOW_LENGTH};
pub use error::{
    ConfigError, ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};
