//! Hyperloop Daemon - simulated pod telemetry service
//!
//! Serves one isolated fleet per session over a JSON API.

use anyhow::Result;
use clap::Parser;
use hyperloopd::config::{Config, ConfigSource};
use hyperloopd::server;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "hyperloopd")]
#[command(about = "Avishkar Hyperloop Control Center daemon", long_about = None)]
#[command(version = hyperloop_common::VERSION)]
struct Cli {
    /// Config file (default: /etc/hyperloop/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the bind address from the config file
    #[arg(long)]
    bind: Option<String>,

    /// Override the simulation seed from the config file
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, source) = Config::load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.server.bind_addr = bind;
    }
    if cli.seed.is_some() {
        config.simulation.seed = cli.seed;
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(config.log.env_filter())
        .init();

    info!("Hyperloop Daemon v{} starting", hyperloop_common::VERSION);
    match &source {
        ConfigSource::File(path) => info!("  Loaded config from {}", path.display()),
        ConfigSource::Defaults(reason) => warn!("Config not found, using defaults: {}", reason),
    }
    if let Some(seed) = config.simulation.seed {
        info!("  Deterministic simulation, base seed {}", seed);
    }

    server::run(config).await
}
