use anyhow::Result;
use clap::{Parser, Subcommand};
use cli::ImportCommand;
use tracing_subscriber::EnvFilter;

/// Obsbind CLI - tabular observation binding tool
#[derive(Debug, Parser)]
#[command(
    name = "obsbind",
    version,
    about = "Bind tabular observation data into typed observation records"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Bind a CSV file against an import configuration
    Import(ImportCommand),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Import(cmd) => cmd.execute()?,
    };

    std::process::exit(exit_code);
}
