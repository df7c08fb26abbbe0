//! Sohayok Control - CLI client for the community assistant
//!
//! Answers locally from the configured knowledge base, or through a running
//! sohayokd when --remote is given.

use anyhow::Result;
use clap::Parser;
use sohayokctl::cli::{Cli, Commands};
use sohayokctl::commands;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Ask { explain, text } => commands::ask(&cli.global, &text, explain).await,
        Commands::Chat => commands::chat(&cli.global).await,
        Commands::Rules => commands::rules(&cli.global),
        Commands::Check { file } => commands::check(&file),
    }
}
