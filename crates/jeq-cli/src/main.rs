//! jeq CLI - command-line front end for the jeq three-band equalizer.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "jeq")]
#[command(author, version, about = "jeq three-band parametric equalizer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a WAV file through the equalizer
    Process(commands::process::ProcessArgs),

    /// Print the magnitude response of an EQ setting
    Response(commands::response::ResponseArgs),

    /// List the equalizer parameters with ranges and defaults
    Params(commands::params::ParamsArgs),

    /// List presets or show one preset
    Presets(commands::presets::PresetsArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Response(args) => commands::response::run(args),
        Commands::Params(args) => commands::params::run(&args),
        Commands::Presets(args) => commands::presets::run(&args),
    }
}
