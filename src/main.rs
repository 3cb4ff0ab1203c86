//! Emoji Tic-Tac-Toe - terminal entry point.

#![warn(missing_docs)]

mod cli;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use emoji_tictactoe::{AppConfig, run_tui};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Log to a file so output cannot corrupt the TUI
    let log_file = std::fs::File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,emoji_tictactoe=debug")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    let mut config = AppConfig::load_or_default(&cli.config)?.with_seed(cli.seed);
    if cli.mute {
        config = config.muted();
    }
    info!(?config, "Configuration resolved");

    run_tui(config).await
}
