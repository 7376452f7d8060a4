//! API error type and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hyperloop_common::FleetError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Session {0} not found")]
    SessionNotFound(Uuid),

    #[error("Session limit reached ({0} active)")]
    SessionLimit(usize),

    #[error(transparent)]
    Fleet(#[from] FleetError),
}

/// JSON error body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::SessionLimit(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Fleet(e) if e.is_bad_input() => StatusCode::BAD_REQUEST,
            ApiError::Fleet(_) => StatusCode::CONFLICT,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::SessionNotFound(_) => "session_not_found",
            ApiError::SessionLimit(_) => "session_limit",
            ApiError::Fleet(e) => e.code(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            // Selectors come from the fleet itself; a miss means the client
            // is rendering state this session never had.
            ApiError::Fleet(FleetError::UnknownPod(name)) => {
                error!("  Selector desync: pod '{}' requested but not in fleet", name)
            }
            ApiError::Fleet(FleetError::DuplicatePod(name)) => {
                error!("  Fleet invariant broken: duplicate pod '{}'", name)
            }
            other => warn!("  Request rejected: {}", other),
        }

        let body = ErrorBody {
            error: self.to_string(),
            code: self.code().to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
