//! Helpers shared by the pipeline commands
//!
//! Config loading, noise selection, pipeline construction and JSON emission.

use std::fs;

use anyhow::{Context, Result};
use colored::Colorize;
use harmscope_backend_adc::noise::{NoiseSource, PcgNoise, SilentNoise};
use harmscope_backend_adc::{AdcError, Pipeline};
use harmscope_spec::SamplingConfig;
use serde::Serialize;

use super::json_output::{error_codes, JsonError, JsonWarning};

/// Options shared by every command that runs the pipeline.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Path to a JSON sampling config; defaults apply when absent.
    pub config_path: Option<String>,
    /// Fixed noise seed; OS entropy when absent.
    pub seed: Option<u32>,
    /// Disable LSB noise entirely.
    pub noiseless: bool,
}

/// The noise source a run will draw from, plus the seed to report.
pub(crate) struct NoiseChoice {
    pub source: Box<dyn NoiseSource>,
    pub seed: Option<u32>,
}

pub(crate) fn load_config(path: Option<&str>) -> Result<SamplingConfig> {
    match path {
        Some(path) => SamplingConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path)),
        None => Ok(SamplingConfig::default()),
    }
}

pub(crate) fn select_noise(options: &RunOptions) -> NoiseChoice {
    if options.noiseless {
        return NoiseChoice {
            source: Box::new(SilentNoise),
            seed: None,
        };
    }

    let noise = match options.seed {
        Some(seed) => PcgNoise::from_seed(seed),
        None => PcgNoise::from_entropy(),
    };
    tracing::info!(seed = noise.seed(), "noise source seeded");
    NoiseChoice {
        seed: Some(noise.seed()),
        source: Box::new(noise),
    }
}

/// Outcome of building a pipeline when errors must be reported as JSON.
pub(crate) enum PipelineBuild {
    Ready(Pipeline),
    Rejected(Vec<JsonError>),
}

pub(crate) fn build_pipeline_json(options: &RunOptions) -> Result<PipelineBuild> {
    let config = match load_config(options.config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            let mut error = JsonError::new(error_codes::CONFIG_LOAD, format!("{:#}", e));
            if let Some(path) = &options.config_path {
                error = error.with_file(path);
            }
            return Ok(PipelineBuild::Rejected(vec![error]));
        }
    };

    match Pipeline::new(config) {
        Ok(pipeline) => Ok(PipelineBuild::Ready(pipeline)),
        Err(AdcError::InvalidConfig { errors }) => Ok(PipelineBuild::Rejected(
            errors.iter().map(JsonError::from_validation_error).collect(),
        )),
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn build_pipeline(options: &RunOptions) -> Result<Pipeline> {
    let config = load_config(options.config_path.as_deref())?;
    let pipeline = Pipeline::new(config)?;
    print_config_warnings(&pipeline);
    Ok(pipeline)
}

pub(crate) fn warnings_to_json(pipeline: &Pipeline) -> Vec<JsonWarning> {
    pipeline
        .warnings()
        .iter()
        .map(JsonWarning::from_validation_warning)
        .collect()
}

fn print_config_warnings(pipeline: &Pipeline) {
    for warning in pipeline.warnings() {
        eprintln!("  {} {}", "!".yellow(), warning);
    }
}

/// Prints `value` as pretty JSON, or writes it to `output_path`.
pub(crate) fn emit_json<T: Serialize>(value: &T, output_path: Option<&str>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output_path {
        Some(path) => {
            fs::write(path, &json).with_context(|| format!("Failed to write to: {}", path))?
        }
        None => println!("{}", json),
    }
    Ok(())
}

pub(crate) fn print_run_header(pipeline: &Pipeline, noise: &NoiseChoice) {
    let config = pipeline.config();
    println!(
        "{} {} Hz sampling, {} Hz fundamental, {} samples",
        "Capture:".cyan().bold(),
        config.sampling_rate_hz,
        config.fundamental_hz,
        config.window_length
    );
    match noise.seed {
        Some(seed) => println!("{} {}", "Seed:".dimmed(), seed),
        None => println!("{} {}", "Seed:".dimmed(), "noiseless"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noiseless_has_no_seed() {
        let choice = select_noise(&RunOptions {
            noiseless: true,
            seed: Some(5),
            ..RunOptions::default()
        });
        assert!(choice.seed.is_none());
    }

    #[test]
    fn test_fixed_seed_reported() {
        let choice = select_noise(&RunOptions {
            seed: Some(77),
            ..RunOptions::default()
        });
        assert_eq!(choice.seed, Some(77));
    }

    #[test]
    fn test_entropy_seed_reported() {
        let choice = select_noise(&RunOptions::default());
        assert!(choice.seed.is_some());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let err = load_config(Some("/nonexistent/harmscope.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to load config"));
    }

    #[test]
    fn test_json_build_reports_validation_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"window_length": 0}"#).unwrap();

        let options = RunOptions {
            config_path: Some(path.to_string_lossy().to_string()),
            ..RunOptions::default()
        };
        match build_pipeline_json(&options).unwrap() {
            PipelineBuild::Rejected(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].code, "C001");
                assert_eq!(errors[0].path.as_deref(), Some("window_length"));
            }
            PipelineBuild::Ready(_) => panic!("expected rejection"),
        }
    }
}
