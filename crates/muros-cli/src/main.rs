//! muros CLI - run audio through the wall-transmission filter.

mod commands;
mod preset;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "muros")]
#[command(author, version, about = "Wall-transmission filter CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a WAV file through the wall filter
    Process(commands::process::ProcessArgs),

    /// Generate test signals
    Generate(commands::generate::GenerateArgs),

    /// Show WAV metadata and the parameter mapping
    Info(commands::info::InfoArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Info(args) => commands::info::run(args),
    }
}
