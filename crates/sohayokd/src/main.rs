//! Sohayok Daemon - community assistant HTTP service
//!
//! Loads the configuration and the rule table, then serves resolution and
//! conversation sessions until interrupted.

use anyhow::{Context, Result};
use clap::Parser;
use sohayok_common::SohayokConfig;
use sohayokd::AppState;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "sohayokd")]
#[command(about = "Sohayok - community assistant daemon", long_about = None)]
#[command(version)]
struct Args {
    /// Configuration file (defaults to $SOHAYOK_CONFIG, then /etc/sohayok/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let (config, source) =
        SohayokConfig::load(args.config.as_deref()).context("Failed to load configuration")?;

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log.level)),
        )
        .init();

    info!("Sohayok Daemon v{} starting", env!("CARGO_PKG_VERSION"));
    info!("Configuration: {}", source);

    let state = AppState::from_config(config)?;
    info!(
        "Knowledge base ready: {} rules",
        state.engine.read().await.table().rule_count()
    );

    sohayokd::run(state).await
}
