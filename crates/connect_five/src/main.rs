//! Connect Five - Unified CLI
//!
//! Runs either the game server or the terminal client.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use connect_five::{Session, Settings};
use std::sync::Arc;
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Command::Serve { host, port } => {
            initialize_tracing("info,connect_five=debug");
            run_server(settings, host, port).await
        }
        Command::Play {
            server_url,
            poll_interval_ms,
        } => {
            // Keep the prompt readable: only warnings unless RUST_LOG says otherwise.
            initialize_tracing("warn");
            run_client(settings, server_url, poll_interval_ms).await
        }
    }
}

/// Run the game server
#[instrument(skip(settings))]
async fn run_server(settings: Settings, host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = settings.server().clone().with_overrides(host, port);
    info!(bind = %config.bind_address(), "Starting Connect Five server");

    let session = Arc::new(Session::new());
    connect_five::serve(&config, session).await?;
    Ok(())
}

/// Run the terminal client
#[instrument(skip(settings))]
async fn run_client(
    settings: Settings,
    server_url: Option<String>,
    poll_interval_ms: Option<u64>,
) -> Result<()> {
    let config = settings
        .client()
        .clone()
        .with_overrides(server_url, poll_interval_ms);
    connect_five::run_client(&config).await
}

fn initialize_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
