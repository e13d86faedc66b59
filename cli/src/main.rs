//! Luxe Rental, CLI server
//!
//! ```sh
//! # Run with default config (~/.config/luxe-rental/config.toml)
//! luxe-rental
//!
//! # Custom config path
//! luxe-rental --config /etc/luxe-rental/config.toml
//!
//! # Throwaway in-memory store on another port
//! luxe-rental --memory --api-port 3000
//!
//! # Validate config without starting
//! luxe-rental --check
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use luxe_rental::config::AppConfig;
use luxe_rental::server::{init_tracing, ServerHandle, ServerOptions};

/// Luxe Rental storefront server.
#[derive(Parser, Debug)]
#[command(
    name = "luxe-rental",
    version,
    about = "Catalog, cart and checkout API for a luxury car rental storefront",
    long_about = "Luxe Rental: REST API for browsing the fleet, reserving vehicles \
                  and placing orders.\n\n\
                  Default config: ~/.config/luxe-rental/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "LUXE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Keep all data in memory instead of the database.
    #[arg(long)]
    memory: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(luxe_rental::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", config_path.display(), e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.api_port {
        info!("CLI override: api_port = {}", port);
        config.server.api_port = port;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}:{}", config.server.api_host, config.server.api_port);
        println!("   Database    : {}", config.database.url);
        println!("   Currency    : {}", config.storefront.currency);
        println!("   Admins      : {}", config.admin.user_ids.len());
        println!("   Log level   : {}", config.logging.level);
        return ExitCode::SUCCESS;
    }

    // ── Start server ───────────────────────────────────────────
    let handle = match ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        use_memory: cli.memory,
    })
    .await
    {
        Ok(handle) => handle,
        Err(e) => {
            error!(error = %e, "Failed to start");
            return ExitCode::FAILURE;
        }
    };

    handle.install_signal_handler();
    info!("Press Ctrl+C to shut down gracefully.");

    handle.wait().await;
    ExitCode::SUCCESS
}
