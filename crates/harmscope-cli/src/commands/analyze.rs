//! Analyze command implementation
//!
//! Synthesizes one capture and lists the harmonics that stand above the
//! quantization noise floor.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;

use harmscope_backend_adc::{Analysis, Pipeline};

use super::common::{
    build_pipeline, build_pipeline_json, emit_json, print_run_header, select_noise,
    warnings_to_json, PipelineBuild, RunOptions,
};
use super::json_output::{error_codes, AnalyzeResult, CommandOutput, JsonError, RunInfo};

/// Run the analyze command
///
/// # Arguments
/// * `options` - Config path and noise selection
/// * `output_path` - Optional file for the JSON result
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(options: &RunOptions, output_path: Option<&str>, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(options, output_path)
    } else {
        run_human(options, output_path)
    }
}

fn run_human(options: &RunOptions, output_path: Option<&str>) -> Result<ExitCode> {
    let pipeline = build_pipeline(options)?;
    let mut noise = select_noise(options);
    print_run_header(&pipeline, &noise);

    let analysis = pipeline.run(noise.source.as_mut())?;
    println!("{} {}", "Hash:".dimmed(), &analysis.capture_hash[..16]);
    println!();

    for line in peak_lines(&analysis) {
        println!("{}", line);
    }

    let threshold = pipeline.config().noise_threshold_v();
    println!(
        "\n{} {} peak(s) above {:.4} V",
        "Found".green().bold(),
        analysis.peaks.len(),
        threshold
    );

    if let Some(path) = output_path {
        let result = build_result(&pipeline, noise.seed, &analysis);
        emit_json(&result, Some(path))?;
        println!("{} {}", "Output written to:".green().bold(), path);
    }

    Ok(ExitCode::SUCCESS)
}

fn run_json(options: &RunOptions, output_path: Option<&str>) -> Result<ExitCode> {
    let pipeline = match build_pipeline_json(options)? {
        PipelineBuild::Ready(pipeline) => pipeline,
        PipelineBuild::Rejected(errors) => {
            let output: CommandOutput<AnalyzeResult> = CommandOutput::failure(errors);
            emit_json(&output, output_path)?;
            return Ok(ExitCode::from(1));
        }
    };

    let mut noise = select_noise(options);
    let analysis = match pipeline.run(noise.source.as_mut()) {
        Ok(analysis) => analysis,
        Err(e) => {
            let error = JsonError::new(error_codes::ANALYSIS, e.to_string());
            let output: CommandOutput<AnalyzeResult> = CommandOutput::failure(vec![error]);
            emit_json(&output, output_path)?;
            return Ok(ExitCode::from(1));
        }
    };

    let result = build_result(&pipeline, noise.seed, &analysis);
    let output = CommandOutput::success(result, warnings_to_json(&pipeline));
    emit_json(&output, output_path)?;
    Ok(ExitCode::SUCCESS)
}

/// One `"<freq>Hz = <magnitude>V"` line per peak, ascending frequency.
pub fn peak_lines(analysis: &Analysis) -> Vec<String> {
    analysis
        .peaks
        .iter()
        .map(|p| format!("{}Hz = {:.4}V", p.frequency_hz, p.magnitude_v))
        .collect()
}

fn build_result(pipeline: &Pipeline, seed: Option<u32>, analysis: &Analysis) -> AnalyzeResult {
    AnalyzeResult {
        run: RunInfo::new(pipeline.config(), seed, analysis),
        threshold_v: pipeline.config().noise_threshold_v(),
        peaks: analysis.peaks.iter().copied().collect(),
    }
}
