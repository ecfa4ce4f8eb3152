//! Shield CLI - terminal adapter for the v3 orchestrator
//!
//! Marshals a JSON request in and a JSON response out. A DENY is a normal
//! result and exits 0; only unreadable or malformed input is an error.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

use config::ShieldConfig;
use error::CliError;

/// Shield CLI application
#[derive(Parser)]
#[command(name = "shield")]
#[command(about = "Quantum Immune Shield - orchestrator v3 CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "SHIELD_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log level (overrides configuration; RUST_LOG overrides both)
    #[arg(long, env = "SHIELD_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Evaluate a JSON request and print the JSON response
    Evaluate {
        /// Request file, or `-` for stdin
        #[arg(short, long, default_value = "-")]
        request: PathBuf,
    },

    /// Print the canonical JSON and context hash of a JSON document
    Hash {
        /// Input file, or `-` for stdin
        #[arg(short, long, default_value = "-")]
        file: PathBuf,
    },

    /// Show the effective configuration
    Config,
}

fn init_tracing(config: &ShieldConfig, cli: &Cli) {
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into());

    if cli.json_logs || config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ShieldConfig::load(cli.config.as_deref()).map_err(CliError::from)?;
    init_tracing(&config, &cli);
    tracing::debug!(name = %config.name, "Configuration loaded");

    match &cli.command {
        Commands::Evaluate { request } => commands::evaluate(&config, request)?,
        Commands::Hash { file } => commands::hash(file)?,
        Commands::Config => commands::show_config(&config)?,
    }

    Ok(())
}
