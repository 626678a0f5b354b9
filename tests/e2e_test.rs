//! End-to-end flow: bootstrap through webhook dispatch.
//!
//! Wires the real bootstrapper to the real route table and router, then
//! drives inbound webhook calls against the resulting HTTP surface. This is
//! the full activation-gate story: a clean environment ends with a working
//! endpoint relaying gateway responses, a dirty one ends with notices and a
//! dead route.

use std::{sync::Arc, time::Duration};

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use mobbex_api::{create_router, AppState, RouteTable};
use mobbex_core::{
    notice::NoOpNoticeSink, BootstrapState, Bootstrapper, GatewayRegistry, PaymentGateway,
    RouteRegistrar, WebhookResponse,
};
use mobbex_testing::{bare_env, init_test_tracing, satisfied_env, StaticGateway};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn bootstrap_and_route(
    env: mobbex_core::EnvSnapshot,
    gateway: Arc<dyn PaymentGateway>,
) -> (BootstrapState, axum::Router) {
    init_test_tracing();

    let registry = Arc::new(GatewayRegistry::new());
    let routes = Arc::new(RouteTable::new());

    let mut bootstrapper = Bootstrapper::new(
        Arc::new(env),
        gateway,
        Arc::clone(&registry),
        Arc::clone(&routes) as Arc<dyn RouteRegistrar>,
        Arc::new(NoOpNoticeSink::new()),
    );
    let state = bootstrapper.run().await;

    let app = create_router(
        AppState { registry, routes, bootstrap: state },
        Duration::from_secs(30),
    );
    (state, app)
}

fn post_webhook(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/mobbex/v1/webhook")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response should be valid JSON")
}

/// Clean environment: bootstrap activates and a webhook call returns the
/// gateway's response unmodified.
#[tokio::test]
async fn active_integration_relays_gateway_response() {
    let gateway = Arc::new(StaticGateway::with_response(WebhookResponse::with_payload(json!({
        "status": "approved",
    }))));
    let (state, app) = bootstrap_and_route(satisfied_env(), gateway.clone()).await;

    assert_eq!(state, BootstrapState::Active);

    let response =
        app.oneshot(post_webhook(r#"{"type":"checkout","data":{"id":"chk-9"}}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "result": true, "status": "approved" }));
    assert_eq!(gateway.received_count(), 1);
}

/// Dirty environment: bootstrap fails, the webhook route stays dead, and
/// the gateway is never invoked.
#[tokio::test]
async fn failed_bootstrap_leaves_webhook_route_dead() {
    let gateway = Arc::new(StaticGateway::acknowledging());
    let (state, app) = bootstrap_and_route(bare_env(), gateway.clone()).await;

    assert_eq!(state, BootstrapState::Failed);

    let webhook = app.clone().oneshot(post_webhook(r#"{"type":"checkout"}"#)).await.unwrap();
    assert_eq!(webhook.status(), StatusCode::NOT_FOUND);
    assert_eq!(gateway.received_count(), 0);

    // The process itself keeps serving: health is fine, readiness is not.
    let ready = app
        .oneshot(Request::builder().method("GET").uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(ready.status(), StatusCode::SERVICE_UNAVAILABLE);
}

/// Consecutive webhook calls are independent: a miss after deregistration
/// never poisons the next call.
#[tokio::test]
async fn webhook_calls_are_independent() {
    let gateway = Arc::new(StaticGateway::acknowledging());
    let (_, app) = bootstrap_and_route(satisfied_env(), gateway.clone()).await;

    for i in 0..3 {
        let response = app
            .clone()
            .oneshot(post_webhook(&format!(r#"{{"seq":{i}}}"#)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "result": true }));
    }
    assert_eq!(gateway.received_count(), 3);
}
