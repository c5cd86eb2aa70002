//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Slidecast - narrated slide presentations driven by JSON scenarios
#[derive(Parser, Debug)]
#[command(name = "slidecast")]
#[command(about = "Narrated slide presentations driven by JSON scenarios", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file to use instead of the layered lookup
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that a scenario file loads and summarise it
    Validate {
        /// Path to the scenario JSON file
        scenario: PathBuf,
    },

    /// List every action with its slide page and effective parameters
    Inspect {
        /// Path to the scenario JSON file
        scenario: PathBuf,

        /// Rate multiplier to resolve parameters with
        #[arg(long, default_value = "1.0")]
        rate_multiplier: f64,
    },

    /// Rehearse a scenario on the console
    Play {
        /// Path to the scenario JSON file
        scenario: PathBuf,

        /// Zero-based action index to start from
        #[arg(long)]
        from: Option<usize>,

        /// Initial rate multiplier
        #[arg(long, default_value = "1.0")]
        rate_multiplier: f64,
    },
}
