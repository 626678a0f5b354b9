//! Health and readiness probes.
//!
//! Liveness only says the process is up; readiness reports the bootstrap
//! outcome, so orchestration can distinguish a healthy-but-inactive
//! integration (validation failed, webhook route never registered) from an
//! active one.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use mobbex_core::BootstrapState;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::server::AppState;

/// Health check response body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// When the check ran.
    pub timestamp: DateTime<Utc>,
    /// Bootstrap outcome of the integration.
    pub bootstrap: &'static str,
    /// Number of registered gateways.
    pub gateways: usize,
    /// Crate version.
    pub version: &'static str,
}

/// `GET /health` - overall service health.
///
/// Answers 200 whenever the process is serving; the body carries the
/// bootstrap state so a failed activation is visible without being an
/// outage.
#[instrument(name = "health_check", skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Response {
    debug!("performing health check");

    let body = HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
        bootstrap: state.bootstrap.as_str(),
        gateways: state.registry.len(),
        version: env!("CARGO_PKG_VERSION"),
    };

    (StatusCode::OK, Json(body)).into_response()
}

/// Readiness response body.
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    /// Whether the integration is active and accepting webhooks.
    pub ready: bool,
    /// Bootstrap outcome.
    pub bootstrap: &'static str,
}

/// `GET /ready` - 200 once bootstrap reached `Active`, 503 otherwise.
pub async fn readiness_check(State(state): State<AppState>) -> Response {
    let ready = state.bootstrap == BootstrapState::Active;
    let status = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };

    (status, Json(ReadinessResponse { ready, bootstrap: state.bootstrap.as_str() })).into_response()
}

/// `GET /live` - trivial liveness probe.
pub async fn liveness_check() -> Response {
    (StatusCode::OK, Json(serde_json::json!({ "status": "alive" }))).into_response()
}
