//! Health and readiness probe tests.

use std::{sync::Arc, time::Duration};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use mobbex_api::{create_router, AppState, RouteTable};
use mobbex_core::{BootstrapState, GatewayRegistry};
use mobbex_testing::init_test_tracing;
use serde_json::Value;
use tower::ServiceExt;

fn router_in_state(bootstrap: BootstrapState) -> Router {
    init_test_tracing();
    let state = AppState {
        registry: Arc::new(GatewayRegistry::new()),
        routes: Arc::new(RouteTable::new()),
        bootstrap,
    };
    create_router(state, Duration::from_secs(30))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.expect("failed to make request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let body = serde_json::from_slice(&bytes).expect("probe response should be valid JSON");
    (status, body)
}

/// Health answers 200 regardless of bootstrap outcome and reports it.
#[tokio::test]
async fn health_reports_bootstrap_state() {
    let (status, body) = get_json(router_in_state(BootstrapState::Failed), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["bootstrap"], "failed");
}

/// Readiness is tied to the `Active` state.
#[tokio::test]
async fn readiness_follows_activation() {
    let (status, body) = get_json(router_in_state(BootstrapState::Active), "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ready"], true);

    let (status, body) = get_json(router_in_state(BootstrapState::Failed), "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["ready"], false);
    assert_eq!(body["bootstrap"], "failed");
}

/// Liveness only says the process is up.
#[tokio::test]
async fn liveness_is_unconditional() {
    let (status, body) = get_json(router_in_state(BootstrapState::NotLoaded), "/live").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "alive");
}
