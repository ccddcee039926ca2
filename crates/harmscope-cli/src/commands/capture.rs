//! Capture command implementation
//!
//! Writes the synthetic ADC capture to a WAV file for inspection in
//! external tools.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::ExitCode;

use harmscope_backend_adc::capture::write_capture_wav;

use super::common::{build_pipeline, print_run_header, select_noise, RunOptions};

/// Run the capture command
///
/// # Arguments
/// * `options` - Config path and noise selection
/// * `out_path` - Destination WAV file
pub fn run(options: &RunOptions, out_path: &str) -> Result<ExitCode> {
    let pipeline = build_pipeline(options)?;
    let mut noise = select_noise(options);
    print_run_header(&pipeline, &noise);

    let waveform = pipeline.synthesize(noise.source.as_mut());
    write_capture_wav(out_path, &waveform, pipeline.config().sampling_rate_hz)
        .with_context(|| format!("Failed to write capture: {}", out_path))?;

    println!(
        "{} {} samples, peak {:.4} V",
        "Captured".green().bold(),
        waveform.len(),
        waveform.peak_abs()
    );
    println!("{} {}", "Written to:".green().bold(), out_path);
    Ok(ExitCode::SUCCESS)
}
