//! Config command implementation
//!
//! Resolves a configuration (defaults plus an optional file), validates it,
//! and prints it together with the quantities the pipeline derives from it.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::process::ExitCode;

use harmscope_spec::SamplingConfig;

use super::common::{emit_json, load_config};
use super::json_output::{error_codes, CommandOutput, JsonError, JsonWarning};

/// Resolved configuration plus derived quantities.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigReport {
    pub config: SamplingConfig,
    pub samples_per_cycle: u32,
    pub noise_threshold_v: f64,
    pub bin_resolution_hz: f64,
    pub nyquist_hz: f64,
}

impl ConfigReport {
    /// Derives the report; `config` must already be valid.
    pub fn new(config: SamplingConfig) -> Self {
        Self {
            samples_per_cycle: config.samples_per_cycle(),
            noise_threshold_v: config.noise_threshold_v(),
            bin_resolution_hz: config.bin_resolution_hz(),
            nyquist_hz: config.nyquist_hz(),
            config,
        }
    }
}

/// Run the config command
///
/// # Returns
/// Exit code: 0 if the configuration is valid, 1 otherwise
pub fn run(config_path: Option<&str>, json_output: bool) -> Result<ExitCode> {
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) if json_output => {
            let mut error = JsonError::new(error_codes::CONFIG_LOAD, format!("{:#}", e));
            if let Some(path) = config_path {
                error = error.with_file(path);
            }
            emit_json(&CommandOutput::<ConfigReport>::failure(vec![error]), None)?;
            return Ok(ExitCode::from(1));
        }
        Err(e) => return Err(e),
    };

    let validation = config.validate();

    if json_output {
        if !validation.is_ok() {
            let errors = validation
                .errors
                .iter()
                .map(JsonError::from_validation_error)
                .collect();
            emit_json(&CommandOutput::<ConfigReport>::failure(errors), None)?;
            return Ok(ExitCode::from(1));
        }
        let warnings = validation
            .warnings
            .iter()
            .map(JsonWarning::from_validation_warning)
            .collect();
        emit_json(&CommandOutput::success(ConfigReport::new(config), warnings), None)?;
        return Ok(ExitCode::SUCCESS);
    }

    if !validation.is_ok() {
        for error in &validation.errors {
            eprintln!("  {} {}", "x".red(), error);
        }
        anyhow::bail!("configuration has {} error(s)", validation.errors.len());
    }

    for warning in &validation.warnings {
        eprintln!("  {} {}", "!".yellow(), warning);
    }

    let report = ConfigReport::new(config);
    println!("{}", report.config.to_json_pretty()?);
    println!();
    println!("{} {}", "Samples per cycle:".dimmed(), report.samples_per_cycle);
    println!("{} {:.4} V", "Noise threshold:".dimmed(), report.noise_threshold_v);
    println!("{} {} Hz", "Bin resolution:".dimmed(), report.bin_resolution_hz);
    println!("{} {} Hz", "Nyquist:".dimmed(), report.nyquist_hz);
    Ok(ExitCode::SUCCESS)
}
