//! CLI argument definitions for the harmscope command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Args, Parser, Subcommand};

use harmscope_cli::commands::RunOptions;

/// harmscope - ADC harmonic capture synthesis and spectral analysis
#[derive(Parser)]
#[command(name = "harmscope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every command that synthesizes a capture.
#[derive(Args, Debug, Clone)]
pub(crate) struct RunArgs {
    /// Path to a JSON sampling config (default: built-in reference values)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Seed for the LSB noise generator (default: random)
    #[arg(short, long)]
    pub seed: Option<u32>,

    /// Disable LSB noise
    #[arg(long, conflicts_with = "seed")]
    pub noiseless: bool,
}

impl RunArgs {
    pub fn to_options(&self) -> RunOptions {
        RunOptions {
            config_path: self.config.clone(),
            seed: self.seed,
            noiseless: self.noiseless,
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Synthesize a capture and list harmonics above the noise threshold
    Analyze {
        #[command(flatten)]
        run: RunArgs,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,

        /// Write the JSON result to a file
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List every spectrum bin above a display floor
    Spectrum {
        #[command(flatten)]
        run: RunArgs,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,

        /// List only bins above this many volts (default: one ADC step)
        #[arg(long)]
        min_magnitude: Option<f64>,
    },

    /// Write the synthetic capture to a WAV file
    Capture {
        #[command(flatten)]
        run: RunArgs,

        /// Destination WAV file
        #[arg(long)]
        out: String,
    },

    /// Validate and print the resolved sampling configuration
    Config {
        /// Path to a JSON sampling config
        #[arg(short, long)]
        config: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}
