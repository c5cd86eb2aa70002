//! Slidecast CLI binary.
//!
//! This binary provides command-line access to Slidecast's functionality:
//! - Validate and inspect scenario files
//! - Rehearse a scenario on the console with live presenter controls

use clap::Parser;
use slidecast::{SlidecastConfig, telemetry};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, inspect_scenario, play_scenario, validate_scenario};

    // Load .env before anything reads RUST_LOG
    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let cli = Cli::parse();

    telemetry::init_telemetry(cli.verbose)?;

    // Execute the requested command
    let result = match cli.command {
        Commands::Validate { scenario } => validate_scenario(&scenario),

        Commands::Inspect {
            scenario,
            rate_multiplier,
        } => inspect_scenario(&scenario, rate_multiplier),

        Commands::Play {
            scenario,
            from,
            rate_multiplier,
        } => {
            let config = match &cli.config {
                Some(path) => SlidecastConfig::from_file(path)?,
                None => SlidecastConfig::load()?,
            };
            play_scenario(&scenario, from, rate_multiplier, &config).await
        }
    };

    telemetry::shutdown_telemetry();
    result?;

    Ok(())
}
