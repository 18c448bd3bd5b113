//! Docent CLI
//!
//! Ask questions about a PDF, or run the stock and travel advisors.

use anyhow::Result;
use clap::Parser;
use docent_core::error::exit_codes;
use docent_core::{Config, DocentError};

mod app;
mod commands;
mod progress;

use app::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let code = match run(cli).await {
        Ok(()) => exit_codes::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            err.downcast_ref::<DocentError>()
                .map(DocentError::exit_code)
                .unwrap_or(exit_codes::GENERAL_ERROR)
        }
    };

    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Chat(args) => commands::chat::run(args, config).await,
        Commands::Stock(args) => commands::stock::run(args, config).await,
        Commands::Travel(args) => commands::travel::run(args, config).await,
    }
}
