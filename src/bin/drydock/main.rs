//! Drydock CLI - CI build-matrix generation and host provisioning

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("drydock=debug")
    } else {
        EnvFilter::new("drydock=info")
    };

    // Logs go to stderr so `matrix --json` stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::Matrix(args) => commands::matrix::execute(args),
        Commands::Provision(args) => commands::provision::execute(args),
        Commands::Doctor(args) => commands::doctor::execute(args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
