//! CopShop records service
//!
//! REST API for organizations, police officers and users.
//! Reads configuration from a TOML file (~/.config/copshop/config.toml).

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use copshop::config::{default_config_path, AppConfig};
use copshop::server::{init_tracing, ServerHandle, ServerOptions};

#[derive(Debug, Parser)]
#[command(name = "copshop", version, about = "CopShop records service")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "COPSHOP_CONFIG")]
    config: Option<PathBuf>,

    /// Override `[server] port`
    #[arg(short, long)]
    port: Option<u16>,

    /// Override `[logging] level`
    #[arg(long)]
    log_level: Option<String>,

    /// Validate the configuration and exit
    #[arg(long)]
    check: bool,

    /// Do not run database migrations on startup
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => apply_overrides(cfg, &cli),
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if cli.check {
        println!("Configuration OK: {}", config_path.display());
        return Ok(());
    }

    init_tracing(&app_cfg);
    info!("Configuration loaded from {}", config_path.display());

    run(app_cfg, &cli).await
}

fn apply_overrides(mut cfg: AppConfig, cli: &Cli) -> AppConfig {
    if let Some(port) = cli.port {
        cfg.server.port = port;
    }
    if let Some(level) = &cli.log_level {
        cfg.logging.level = level.clone();
    }
    cfg
}

async fn run(config: AppConfig, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    handle.install_signal_handler();
    info!("Server started. Press Ctrl+C to shutdown gracefully.");

    handle.wait().await;
    Ok(())
}
