//! harmscope CLI - synthetic ADC captures and harmonic analysis
//!
//! This binary synthesizes what an ADC would record for a configured set of
//! harmonics and reports the spectrum recovered from that capture.

use clap::Parser;
use std::process::ExitCode;

mod cli_args;

// Use modules from the library crate
use harmscope_cli::{commands, logging};

use cli_args::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Analyze { run, json, output } => {
            commands::analyze::run(&run.to_options(), output.as_deref(), json)
        }
        Commands::Spectrum {
            run,
            json,
            min_magnitude,
        } => commands::spectrum::run(&run.to_options(), min_magnitude, json),
        Commands::Capture { run, out } => commands::capture::run(&run.to_options(), &out),
        Commands::Config { config, json } => commands::config::run(config.as_deref(), json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
