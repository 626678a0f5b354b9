//! Webhook endpoint tests.
//!
//! Exercises the transport contract of `POST /mobbex/v1/webhook`: every
//! code path must yield a JSON body with a boolean `result`, including
//! registry misses, erroring gateways, panicking gateways, and malformed
//! request bodies.

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use mobbex_api::{create_router, AppState, RouteTable};
use mobbex_core::{
    BootstrapState, GatewayId, GatewayRegistry, PaymentGateway, RouteRegistrar, WebhookRequest,
    WebhookResponse,
};
use mobbex_testing::{
    init_test_tracing, ErrorCountLayer, FailingGateway, PanickingGateway, StaticGateway,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use tracing::instrument::WithSubscriber;
use tracing_subscriber::layer::SubscriberExt;

fn router_with(gateway: Option<Arc<dyn PaymentGateway>>, armed: bool) -> Router {
    init_test_tracing();

    let registry = Arc::new(GatewayRegistry::new());
    if let Some(gateway) = gateway {
        registry.register(GatewayId::Mobbex, gateway);
    }

    let routes = Arc::new(RouteTable::new());
    let bootstrap = if armed {
        routes.register_webhook(GatewayId::Mobbex);
        BootstrapState::Active
    } else {
        BootstrapState::Failed
    };

    create_router(AppState { registry, routes, bootstrap }, Duration::from_secs(30))
}

fn webhook_request(body: &str) -> Request<Body> {
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
    serde_json::from_slice(&bytes).expect("response body should be valid JSON")
}

/// A registered gateway's response passes through unmodified.
#[tokio::test]
async fn gateway_response_passes_through_unmodified() {
    let gateway = Arc::new(StaticGateway::with_response(WebhookResponse::with_payload(json!({
        "status": "approved",
        "transaction": "mobbex-1234",
    }))));
    let app = router_with(Some(gateway.clone()), true);

    let response =
        app.oneshot(webhook_request(r#"{"type":"checkout","reference":"ord-77"}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({ "result": true, "status": "approved", "transaction": "mobbex-1234" })
    );

    // The gateway saw the parsed params, untouched.
    let received = gateway.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].method, "POST");
    assert_eq!(received[0].params, json!({ "type": "checkout", "reference": "ord-77" }));
}

/// A gateway returning a non-object payload still yields a well-formed
/// JSON object beside `result`; the body must never degrade to plain text.
#[tokio::test]
async fn non_object_payload_keeps_the_body_well_formed() {
    let gateway =
        Arc::new(StaticGateway::with_response(WebhookResponse::with_payload(json!("approved"))));
    let app = router_with(Some(gateway), true);

    let response =
        app.oneshot(webhook_request(r#"{"type":"checkout","reference":"ord-78"}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "result": true, "data": "approved" }));
}

/// No registered gateway: normalized failure, still HTTP 200.
#[tokio::test]
async fn missing_gateway_yields_result_false() {
    let app = router_with(None, true);

    let response = app.oneshot(webhook_request(r#"{"type":"checkout"}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "result": false }));
}

/// A handler error is contained at the boundary.
#[tokio::test]
async fn erroring_gateway_yields_result_false() {
    let app = router_with(Some(Arc::new(FailingGateway)), true);

    let response = app.oneshot(webhook_request(r#"{"type":"payment"}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "result": false }));
}

/// Even a panicking handler cannot break the transport contract.
#[tokio::test]
async fn panicking_gateway_yields_result_false() {
    let app = router_with(Some(Arc::new(PanickingGateway)), true);

    let response = app.oneshot(webhook_request(r#"{"type":"payment"}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "result": false }));
}

/// Malformed bodies are forwarded as `Null` params, not rejected.
#[tokio::test]
async fn malformed_body_is_forwarded_leniently() {
    let gateway = Arc::new(StaticGateway::acknowledging());
    let app = router_with(Some(gateway.clone()), true);

    let response = app.oneshot(webhook_request("this is not json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "result": true }));
    assert_eq!(gateway.received()[0].params, Value::Null);
}

/// An empty body behaves like a malformed one.
#[tokio::test]
async fn empty_body_still_gets_a_structured_response() {
    let app = router_with(Some(Arc::new(StaticGateway::acknowledging())), true);

    let response = app.oneshot(webhook_request("")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body.get("result").and_then(Value::as_bool).is_some());
}

/// While the route is unarmed (failed bootstrap), the endpoint answers 404
/// as if it had never been registered.
#[tokio::test]
async fn unarmed_route_answers_not_found() {
    let app = router_with(Some(Arc::new(StaticGateway::acknowledging())), false);

    let response = app.oneshot(webhook_request(r#"{"type":"checkout"}"#)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Every response carries a boolean `result`, across all failure modes.
#[tokio::test]
async fn result_field_is_always_boolean() {
    let cases: Vec<Option<Arc<dyn PaymentGateway>>> = vec![
        None,
        Some(Arc::new(StaticGateway::acknowledging())),
        Some(Arc::new(FailingGateway)),
        Some(Arc::new(PanickingGateway)),
    ];

    for gateway in cases {
        let app = router_with(gateway, true);
        let response = app.oneshot(webhook_request(r#"{"k":1}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(
            body.get("result").and_then(Value::as_bool).is_some(),
            "missing boolean result in {body}"
        );
    }
}

/// Runs a dispatch against `registry` under a private subscriber and
/// returns the response together with the number of ERROR entries logged.
async fn dispatch_counting_errors(registry: &GatewayRegistry) -> (WebhookResponse, usize) {
    let layer = ErrorCountLayer::new();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let request = WebhookRequest::new("POST", HashMap::new(), json!({ "type": "payment" }));
    let response =
        mobbex_api::handlers::webhook::dispatch(registry, request).with_subscriber(subscriber).await;

    (response, layer.count())
}

/// Each dispatch fault logs exactly one failure entry; a clean dispatch
/// logs none.
#[tokio::test]
async fn each_dispatch_fault_logs_exactly_one_error() {
    // Registry miss.
    let registry = GatewayRegistry::new();
    let (response, errors) = dispatch_counting_errors(&registry).await;
    assert_eq!(response, WebhookResponse::failure());
    assert_eq!(errors, 1);

    // Handler error.
    let registry = GatewayRegistry::new();
    registry.register(GatewayId::Mobbex, Arc::new(FailingGateway));
    let (response, errors) = dispatch_counting_errors(&registry).await;
    assert_eq!(response, WebhookResponse::failure());
    assert_eq!(errors, 1);

    // Handler panic.
    let registry = GatewayRegistry::new();
    registry.register(GatewayId::Mobbex, Arc::new(PanickingGateway));
    let (response, errors) = dispatch_counting_errors(&registry).await;
    assert_eq!(response, WebhookResponse::failure());
    assert_eq!(errors, 1);

    // Successful dispatch.
    let registry = GatewayRegistry::new();
    registry.register(GatewayId::Mobbex, Arc::new(StaticGateway::acknowledging()));
    let (response, errors) = dispatch_counting_errors(&registry).await;
    assert_eq!(response, WebhookResponse::ok());
    assert_eq!(errors, 0);
}

/// Responses carry the request-ID header injected by the middleware.
#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = router_with(Some(Arc::new(StaticGateway::acknowledging())), true);

    let response = app.oneshot(webhook_request(r#"{}"#)).await.unwrap();

    assert!(response.headers().contains_key("X-Request-Id"));
}
