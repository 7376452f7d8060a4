//! One-shot commands: print a single widget and exit.

use crate::client::DaemonClient;
use crate::source::FrameSource;
use anyhow::Result;
use hyperloop_common::render::{
    comparison_lines, tracker_table, weather_lines, COMPARISON_HEADER, ENERGY_HEADER,
    TRACKER_HEADER, WEATHER_HEADER,
};
use hyperloop_common::{random_energy_tip, sample_weather, DashboardQuery, WeatherPanel};
use owo_colors::OwoColorize;

fn heading(title: &str) {
    println!("{}", title.bright_green().bold());
}

/// Run one cycle and print the tracker table
pub async fn status(source: &mut FrameSource, query: &DashboardQuery) -> Result<()> {
    let frame = source.next_frame(query).await?;

    heading(&format!(
        "{} (filter: {}, sorted by {})",
        TRACKER_HEADER,
        frame.tracker.status_filter,
        frame.tracker.sort_key.column_label()
    ));
    if frame.tracker.rows.is_empty() {
        println!("  {}", "No pods match this filter".dimmed());
    } else {
        print!("{}", tracker_table(&frame.tracker.rows));
    }
    Ok(())
}

pub async fn compare(source: &mut FrameSource, pod_a: &str, pod_b: &str) -> Result<()> {
    let chart = source.compare(pod_a, pod_b).await?;

    heading(COMPARISON_HEADER);
    for line in comparison_lines(&chart) {
        println!("{}", line);
    }
    Ok(())
}

/// Weather and tips are stateless: ask the daemon, or draw locally
pub async fn weather(client: Option<&DaemonClient>) -> Result<()> {
    let panel = match client {
        Some(client) => client.weather().await?,
        None => WeatherPanel::from_sample(sample_weather(&mut rand::thread_rng())),
    };

    heading(WEATHER_HEADER);
    // Last line is the advisory; print it highlighted
    for line in weather_lines(&panel).iter().take(3) {
        println!("  {}", line);
    }
    println!("  {}", panel.advisory.yellow());
    Ok(())
}

pub async fn tip(client: Option<&DaemonClient>) -> Result<()> {
    let tip = match client {
        Some(client) => client.tip().await?,
        None => random_energy_tip(&mut rand::thread_rng()).to_string(),
    };

    heading(ENERGY_HEADER);
    println!("  {}", tip.cyan());
    Ok(())
}

pub async fn health(client: &DaemonClient) -> Result<()> {
    let health = client.health().await?;

    heading("hyperloopd");
    println!("  Status:   {}", health.status.green());
    println!("  Version:  {}", health.version);
    println!("  Uptime:   {}s", health.uptime_seconds);
    println!("  Sessions: {}", health.sessions);
    Ok(())
}
