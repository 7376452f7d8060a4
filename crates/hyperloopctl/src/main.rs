//! Hyperloop Control - terminal client for the Avishkar control center
//!
//! Provides the interactive dashboard and one-shot widget commands.

use anyhow::Result;
use clap::Parser;
use hyperloopctl::cli::{Cli, Commands};
use hyperloopctl::client::DaemonClient;
use hyperloopctl::commands;
use hyperloopctl::dashboard;
use hyperloopctl::source::FrameSource;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let query = cli.command.query();

    let client = if cli.local {
        None
    } else {
        Some(DaemonClient::new(&cli.url)?)
    };

    match &cli.command {
        Commands::Dashboard { refresh_secs } => {
            let refresh = Duration::from_secs((*refresh_secs).max(1));
            dashboard::run(open_source(&cli).await?, refresh).await?;
        }
        Commands::Status { .. } => {
            let mut source = open_source(&cli).await?;
            let result = commands::status(&mut source, &query).await;
            source.close().await?;
            result?;
        }
        Commands::Compare { pod_a, pod_b } => {
            let mut source = open_source(&cli).await?;
            let result = commands::compare(&mut source, pod_a, pod_b).await;
            source.close().await?;
            result?;
        }
        Commands::Weather => commands::weather(client.as_ref()).await?,
        Commands::Tip => commands::tip(client.as_ref()).await?,
        Commands::Health => match &client {
            Some(client) => commands::health(client).await?,
            None => println!("Running locally; no daemon to query"),
        },
    }

    Ok(())
}

async fn open_source(cli: &Cli) -> Result<FrameSource> {
    if cli.local {
        Ok(FrameSource::local(cli.seed))
    } else {
        FrameSource::remote(&cli.url).await
    }
}
