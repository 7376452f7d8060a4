//! HTTP server for hyperloopd

use crate::config::Config;
use crate::routes;
use crate::sessions::SessionStore;
use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers
pub struct AppState {
    pub store: SessionStore,
    pub config: Config,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            store: SessionStore::new(config.sessions.clone(), config.simulation.seed),
            config,
            start_time: Instant::now(),
        }
    }
}

/// Build the router over shared state
pub fn router(state: Arc<AppState>) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_secs.max(1));

    Router::new()
        .merge(routes::session_routes())
        .merge(routes::widget_routes())
        .merge(routes::health_routes())
        .with_state(state)
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
}

/// Periodically drop idle sessions
fn spawn_reaper(state: Arc<AppState>) -> tokio::task::JoinHandle<()> {
    let interval = state.config.sessions.reap_interval();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            state.store.reap_idle(Instant::now()).await;
        }
    })
}

/// Run the HTTP server until Ctrl-C
pub async fn run(config: Config) -> Result<()> {
    let addr = config.server.bind_addr.clone();
    let state = Arc::new(AppState::new(config));

    let reaper = spawn_reaper(state.clone());
    let app = router(state);

    let (listener, local_addr) = bind(&addr).await?;
    info!("  Listening on http://{}", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    reaper.abort();
    info!("Shutting down gracefully");
    Ok(())
}

/// Bind the listener; port 0 resolves to the port the OS picked.
pub async fn bind(addr: &str) -> Result<(TcpListener, SocketAddr)> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    let local_addr = listener.local_addr()?;
    Ok((listener, local_addr))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_reports_resolved_port() {
        let (_listener, local_addr) = bind("127.0.0.1:0").await.unwrap();
        assert_ne!(local_addr.port(), 0);
        assert!(local_addr.ip().is_loopback());
    }

    #[tokio::test]
    async fn test_bind_bad_address_names_it() {
        let err = bind("not-an-address").await.unwrap_err();
        assert!(format!("{:#}", err).contains("not-an-address"));
    }
}
