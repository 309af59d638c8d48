// SPDX-License-Identifier: MIT

//! sweep - configurable filesystem cleanup

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use sweep_engine::Engine;
use tokio::signal::unix::{signal, SignalKind};
use tracing::info;

#[derive(Parser)]
#[command(name = "sweep", version, about = "Configurable filesystem cleanup")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the cleanup engine until interrupted
    Run(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Path to the rulebook file
    #[arg(long, default_value = "sweep.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => run(args).await,
    }
}

async fn run(args: RunArgs) -> Result<()> {
    let content = std::fs::read_to_string(&args.config)
        .with_context(|| format!("reading rulebook {}", args.config.display()))?;
    let rulebook = sweep_rulebook::parse_rulebook(&content)?;

    let mut engine = Engine::from_rulebook(&rulebook)?;
    engine.start();

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    tokio::select! {
        _ = sigterm.recv() => info!("received SIGTERM, shutting down..."),
        _ = sigint.recv() => info!("received SIGINT, shutting down..."),
    }

    engine.stop().await;
    info!("goodbye");
    Ok(())
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}
