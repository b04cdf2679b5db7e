// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! # Cuboid Service CLI
//!
//! The `cuboid` binary runs the bag and cuboid HTTP service and talks to a
//! running instance.
//!
//! ## Commands
//!
//! - `cuboid serve` - Run the HTTP service
//! - `cuboid cuboids list|show|create|update|delete` - Cuboid operations
//! - `cuboid bags list|show|create|delete` - Bag operations
//! - `cuboid config show|validate|generate` - Configuration management
//! - `cuboid migrate [--dry-run]` - Apply database migrations

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing::debug;

use cuboid_core::domain::service_config::ServiceConfigManifest;
use cuboid_sdk::CuboidClient;
use cuboid_service::commands::{self, BagsCommand, ConfigCommand, CuboidsCommand};
use cuboid_service::server;

/// Cuboid Service - bags and the cuboids they hold
#[derive(Parser)]
#[command(name = "cuboid")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(
        short,
        long,
        global = true,
        env = "CUBOID_CONFIG_PATH",
        value_name = "FILE"
    )]
    config: Option<PathBuf>,

    /// HTTP API port (default from configuration: 8080)
    #[arg(long, global = true, env = "CUBOID_PORT")]
    port: Option<u16>,

    /// HTTP API host (default from configuration: 127.0.0.1)
    #[arg(long, global = true, env = "CUBOID_HOST")]
    host: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "CUBOID_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service
    #[command(name = "serve")]
    Serve,

    /// Cuboid operations against a running service
    #[command(name = "cuboids")]
    Cuboids {
        #[command(subcommand)]
        command: CuboidsCommand,
    },

    /// Bag operations against a running service
    #[command(name = "bags")]
    Bags {
        #[command(subcommand)]
        command: BagsCommand,
    },

    /// Configuration management
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Apply database migrations
    #[command(name = "migrate")]
    Migrate {
        #[command(flatten)]
        command: commands::MigrateCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is not an error
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        eprintln!("{}", "No command specified. Use --help for usage.".yellow());
        std::process::exit(1);
    };

    if let Commands::Config { command } = command {
        init_logging(cli.log_level.as_deref().unwrap_or("warn"))?;
        return commands::config::handle_command(command, cli.config).await;
    }

    let mut config = ServiceConfigManifest::load_or_default(cli.config.clone())
        .context("Failed to load configuration")?;
    if let Some(host) = cli.host {
        config.spec.server.host = host;
    }
    if let Some(port) = cli.port {
        config.spec.server.port = port;
    }

    let level = cli
        .log_level
        .unwrap_or_else(|| config.spec.logging.level.clone());
    init_logging(&level)?;
    debug!("Configuration resolved: {}", config.bind_address());

    match command {
        Commands::Serve => server::start_server(config).await,
        Commands::Cuboids { command } => {
            commands::cuboids::handle_command(command, client_for(&config)).await
        }
        Commands::Bags { command } => {
            commands::bags::handle_command(command, client_for(&config)).await
        }
        Commands::Migrate { command } => commands::migrate::execute(command, &config).await,
        Commands::Config { .. } => Ok(()),
    }
}

fn client_for(config: &ServiceConfigManifest) -> CuboidClient {
    CuboidClient::new(format!("http://{}", config.bind_address()))
}

/// Initialize tracing subscriber for logging
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(level))
        .context("Failed to create log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    Ok(())
}
