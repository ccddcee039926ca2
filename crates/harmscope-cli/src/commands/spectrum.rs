//! Spectrum command implementation
//!
//! Lists every scanned bin strictly above a display floor, which defaults
//! to one ADC step. Useful for inspecting leakage and noise below the peak
//! threshold.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;

use harmscope_backend_adc::{Analysis, Peak};

use super::common::{
    build_pipeline, build_pipeline_json, emit_json, print_run_header, select_noise,
    warnings_to_json, PipelineBuild, RunOptions,
};
use super::json_output::{error_codes, CommandOutput, JsonError, RunInfo, SpectrumResult};

/// Run the spectrum command
///
/// # Arguments
/// * `options` - Config path and noise selection
/// * `min_magnitude` - Bins must exceed this many volts (default: the config's step size)
/// * `json_output` - Whether to output machine-readable JSON
pub fn run(options: &RunOptions, min_magnitude: Option<f64>, json_output: bool) -> Result<ExitCode> {
    if json_output {
        return run_json(options, min_magnitude);
    }

    let pipeline = build_pipeline(options)?;
    let floor = min_magnitude.unwrap_or(pipeline.config().step_size_v);
    let mut noise = select_noise(options);
    print_run_header(&pipeline, &noise);

    let analysis = pipeline.run(noise.source.as_mut())?;
    let threshold = pipeline.config().noise_threshold_v();
    let bins = bins_above(&analysis, floor);

    println!("{} {:.4} V\n", "Floor:".dimmed(), floor);
    for bin in &bins {
        let line = format!("{}Hz = {:.4}V", bin.frequency_hz, bin.magnitude_v);
        if bin.magnitude_v > threshold {
            println!("{}", line.bold());
        } else {
            println!("{}", line.dimmed());
        }
    }

    println!(
        "\n{} of {} bins listed",
        bins.len().to_string().green().bold(),
        analysis.spectrum.len()
    );
    if let Some(peak) = analysis.spectrum.strongest() {
        println!(
            "{} {}Hz = {:.4}V",
            "Strongest:".cyan().bold(),
            peak.frequency_hz,
            peak.magnitude_v
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn run_json(options: &RunOptions, min_magnitude: Option<f64>) -> Result<ExitCode> {
    let pipeline = match build_pipeline_json(options)? {
        PipelineBuild::Ready(pipeline) => pipeline,
        PipelineBuild::Rejected(errors) => {
            let output: CommandOutput<SpectrumResult> = CommandOutput::failure(errors);
            emit_json(&output, None)?;
            return Ok(ExitCode::from(1));
        }
    };

    let floor = min_magnitude.unwrap_or(pipeline.config().step_size_v);
    let mut noise = select_noise(options);
    let analysis = match pipeline.run(noise.source.as_mut()) {
        Ok(analysis) => analysis,
        Err(e) => {
            let error = JsonError::new(error_codes::ANALYSIS, e.to_string());
            let output: CommandOutput<SpectrumResult> = CommandOutput::failure(vec![error]);
            emit_json(&output, None)?;
            return Ok(ExitCode::from(1));
        }
    };

    let result = SpectrumResult {
        run: RunInfo::new(pipeline.config(), noise.seed, &analysis),
        min_magnitude_v: floor,
        bins: bins_above(&analysis, floor),
        strongest: analysis.spectrum.strongest().copied(),
    };
    emit_json(&CommandOutput::success(result, warnings_to_json(&pipeline)), None)?;
    Ok(ExitCode::SUCCESS)
}

/// Scanned bins whose magnitude strictly exceeds `floor`, ascending frequency.
pub fn bins_above(analysis: &Analysis, floor: f64) -> Vec<Peak> {
    analysis
        .spectrum
        .bins()
        .iter()
        .filter(|b| b.magnitude_v > floor)
        .copied()
        .collect()
}
