//! JSON output types for machine-readable CLI output.
//!
//! Every `--json` command prints one envelope: `success`, structured
//! `errors` and `warnings`, and a command-specific `result` on success.

use harmscope_backend_adc::{Analysis, Peak};
use harmscope_spec::{SamplingConfig, ValidationError, ValidationWarning};
use serde::Serialize;

/// Error codes for CLI operations.
///
/// Configuration validation errors pass through their own codes (C001...).
pub mod error_codes {
    /// Config file could not be read or parsed
    pub const CONFIG_LOAD: &str = "CLI_001";
    /// Transform or export failure
    pub const ANALYSIS: &str = "CLI_002";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "C004")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Config field at fault (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// File the error relates to (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
            file: None,
        }
    }

    /// Attaches a file path.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Converts a config validation error.
    pub fn from_validation_error(error: &ValidationError) -> Self {
        Self {
            code: error.code.code().to_string(),
            message: error.message.clone(),
            path: error.path.clone(),
            file: None,
        }
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "W001")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
    /// Config field the warning relates to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonWarning {
    /// Converts a config validation warning.
    pub fn from_validation_warning(warning: &ValidationWarning) -> Self {
        Self {
            code: warning.code.code().to_string(),
            message: warning.message.clone(),
            path: warning.path.clone(),
        }
    }
}

/// Output envelope shared by every `--json` command.
#[derive(Debug, Clone, Serialize)]
pub struct CommandOutput<T: Serialize> {
    /// Whether the command succeeded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Config warnings
    pub warnings: Vec<JsonWarning>,
    /// Command result (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T: Serialize> CommandOutput<T> {
    /// Creates a successful output.
    pub fn success(result: T, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings,
            result: Some(result),
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            warnings: Vec::new(),
            result: None,
        }
    }
}

/// Run metadata common to analyze and spectrum results.
#[derive(Debug, Clone, Serialize)]
pub struct RunInfo {
    /// Resolved sampling configuration
    pub config: SamplingConfig,
    /// Noise seed (absent for noiseless runs)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    /// BLAKE3 hash of the synthetic capture
    pub capture_hash: String,
}

/// Result of the `analyze` command.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResult {
    /// Run metadata
    #[serde(flatten)]
    pub run: RunInfo,
    /// Noise threshold in volts
    pub threshold_v: f64,
    /// Peaks above the threshold, ascending frequency
    pub peaks: Vec<Peak>,
}

/// Result of the `spectrum` command.
#[derive(Debug, Clone, Serialize)]
pub struct SpectrumResult {
    /// Run metadata
    #[serde(flatten)]
    pub run: RunInfo,
    /// Listed bins exceed this magnitude, in volts
    pub min_magnitude_v: f64,
    /// Listed bins, ascending frequency
    pub bins: Vec<Peak>,
    /// Largest bin of the whole scan, listed or not
    pub strongest: Option<Peak>,
}

impl RunInfo {
    /// Collects run metadata from a finished analysis.
    pub fn new(config: &SamplingConfig, seed: Option<u32>, analysis: &Analysis) -> Self {
        Self {
            config: config.clone(),
            seed,
            capture_hash: analysis.capture_hash.clone(),
        }
    }
}
