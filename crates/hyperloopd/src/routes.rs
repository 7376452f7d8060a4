//! API routes for hyperloopd
//!
//! Session routes run against one isolated fleet; widget routes
//! (weather, tip, speed limit) are stateless.

use crate::error::ApiError;
use crate::server::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use hyperloop_common::{
    random_energy_tip, sample_weather, speed_limit_for, ComparisonChart, DashboardFrame,
    DashboardQuery, FleetError, SortKey, StatusFilter, TrackerView, WeatherCondition,
    WeatherPanel, VERSION,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

type AppStateArc = Arc<AppState>;

// ============================================================================
// Request / Response Types
// ============================================================================

/// Selector query string: `?status=&sort=&pod_a=&pod_b=`
#[derive(Debug, Default, Deserialize)]
pub struct SelectorParams {
    pub status: Option<String>,
    pub sort: Option<String>,
    pub pod_a: Option<String>,
    pub pod_b: Option<String>,
}

impl SelectorParams {
    pub fn into_query(self) -> Result<DashboardQuery, FleetError> {
        let status_filter = match self.status.as_deref() {
            Some(s) => s.parse()?,
            None => StatusFilter::All,
        };
        let sort_key = match self.sort.as_deref() {
            Some(s) => s.parse()?,
            None => SortKey::Speed,
        };

        Ok(DashboardQuery {
            status_filter,
            sort_key,
            pod_a: self.pod_a,
            pod_b: self.pod_b,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CompareParams {
    pub pod_a: String,
    pub pod_b: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TipResponse {
    pub tip: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SpeedLimitResponse {
    pub condition: WeatherCondition,
    pub speed_limit_kmh: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub sessions: usize,
}

// ============================================================================
// Session Routes
// ============================================================================

pub fn session_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/v1/session", post(create_session))
        .route("/v1/session/:id", delete(end_session))
        .route("/v1/session/:id/dashboard", get(dashboard))
        .route("/v1/session/:id/pods", get(pods))
        .route("/v1/session/:id/compare", get(compare))
}

async fn create_session(
    State(state): State<AppStateArc>,
) -> Result<(StatusCode, Json<SessionCreated>), ApiError> {
    let session_id = state.store.create().await?;
    Ok((StatusCode::CREATED, Json(SessionCreated { session_id })))
}

async fn end_session(
    State(state): State<AppStateArc>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.store.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// One interaction cycle: update once, then render the whole frame.
async fn dashboard(
    State(state): State<AppStateArc>,
    Path(id): Path<Uuid>,
    Query(params): Query<SelectorParams>,
) -> Result<Json<DashboardFrame>, ApiError> {
    let query = params.into_query()?;
    let frame = state
        .store
        .with_session(id, |session| session.cycle(&query))
        .await??;

    info!("  Session {} cycle {} rendered", id, frame.cycle);
    Ok(Json(frame))
}

async fn pods(
    State(state): State<AppStateArc>,
    Path(id): Path<Uuid>,
    Query(params): Query<SelectorParams>,
) -> Result<Json<TrackerView>, ApiError> {
    let query = params.into_query()?;
    let view = state
        .store
        .with_session(id, |session| session.view(query.status_filter, query.sort_key))
        .await?;
    Ok(Json(view))
}

async fn compare(
    State(state): State<AppStateArc>,
    Path(id): Path<Uuid>,
    Query(params): Query<CompareParams>,
) -> Result<Json<ComparisonChart>, ApiError> {
    let chart = state
        .store
        .with_session(id, |session| session.compare(&params.pod_a, &params.pod_b))
        .await??;
    Ok(Json(chart))
}

// ============================================================================
// Widget Routes
// ============================================================================

pub fn widget_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/v1/weather", get(weather))
        .route("/v1/tip", get(tip))
        .route("/v1/speed-limit/:condition", get(speed_limit))
}

async fn weather() -> Json<WeatherPanel> {
    let sample = sample_weather(&mut rand::thread_rng());
    Json(WeatherPanel::from_sample(sample))
}

async fn tip() -> Json<TipResponse> {
    let tip = random_energy_tip(&mut rand::thread_rng()).to_string();
    Json(TipResponse { tip })
}

async fn speed_limit(Path(condition): Path<String>) -> Result<Json<SpeedLimitResponse>, ApiError> {
    let condition: WeatherCondition = condition.parse()?;
    Ok(Json(SpeedLimitResponse {
        condition,
        speed_limit_kmh: speed_limit_for(condition),
    }))
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/health", get(health))
}

async fn health(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: VERSION.to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        sessions: state.store.len().await,
    })
}
