//! Webhook dispatch endpoint.
//!
//! Transport-safe bridge between the host's HTTP layer and the gateway's
//! webhook handler. The overriding contract: an internal fault must never
//! become a malformed or missing HTTP response. Lookup misses, handler
//! errors, and handler panics all collapse into `{ "result": false }` with
//! exactly one diagnostic log entry; nothing propagates past this module.

use std::collections::HashMap;

use anyhow::anyhow;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use futures::FutureExt;
use mobbex_core::{GatewayId, GatewayRegistry, WebhookFault, WebhookRequest, WebhookResponse};
use tracing::{debug, error, instrument};

use crate::server::AppState;

/// `POST /mobbex/v1/webhook` - forwards a provider notification to the
/// active gateway.
///
/// Always answers 200 with a JSON body carrying a boolean `result`; a 404
/// is returned only while the route is unarmed (bootstrap not `Active`),
/// matching a route that was never registered. A single attempt per call:
/// redelivery is the payment provider's own webhook retry policy.
#[instrument(
    name = "mobbex_webhook",
    skip(state, headers, body),
    fields(content_length = body.len())
)]
pub async fn mobbex_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !state.routes.webhook_armed() {
        return StatusCode::NOT_FOUND.into_response();
    }

    // Lenient parse: the body is carried through opaquely, so an
    // undecodable payload becomes Null rather than a transport error.
    let params: serde_json::Value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    debug!(%params, "webhook request received");

    let request = WebhookRequest::new("POST", extract_headers(&headers), params);
    let response = dispatch(&state.registry, request).await;

    (StatusCode::OK, Json(response)).into_response()
}

/// Resolves the active gateway and forwards the request.
///
/// Every fault is converted here: a registry miss, a handler error, and a
/// handler panic each log one failure entry and yield the normalized
/// `{ "result": false }`. On success the gateway's response is returned
/// unchanged.
pub async fn dispatch(registry: &GatewayRegistry, request: WebhookRequest) -> WebhookResponse {
    let Some(gateway) = registry.find(GatewayId::Mobbex) else {
        let fault = WebhookFault::HandlerLookup(GatewayId::Mobbex);
        error!(error = %fault, "webhook dispatch failed");
        return WebhookResponse::failure();
    };

    match std::panic::AssertUnwindSafe(gateway.handle_webhook(request)).catch_unwind().await {
        Ok(Ok(response)) => response,
        Ok(Err(source)) => {
            let fault = WebhookFault::HandlerExecution(source);
            error!(error = %fault, "webhook dispatch failed");
            WebhookResponse::failure()
        },
        Err(panic) => {
            let fault = WebhookFault::HandlerExecution(anyhow!(
                "handler panicked: {}",
                panic_message(panic.as_ref())
            ));
            error!(error = %fault, "webhook dispatch failed");
            WebhookResponse::failure()
        },
    }
}

/// Copies headers into the opaque request bag, skipping non-UTF-8 values.
fn extract_headers(headers: &HeaderMap) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for (name, value) in headers {
        if let Ok(value_str) = value.to_str() {
            map.insert(name.as_str().to_string(), value_str.to_string());
        }
    }
    map
}

/// Best-effort text of a panic payload.
fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_extraction_preserves_values() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", "application/json".parse().unwrap());
        headers.insert("x-provider-signature", "abc123".parse().unwrap());

        let extracted = extract_headers(&headers);

        assert_eq!(extracted.get("content-type").unwrap(), "application/json");
        assert_eq!(extracted.get("x-provider-signature").unwrap(), "abc123");
    }

    #[test]
    fn panic_payload_text_is_recovered() {
        let boxed: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(panic_message(boxed.as_ref()), "boom");

        let boxed: Box<dyn std::any::Any + Send> = Box::new(42_u32);
        assert_eq!(panic_message(boxed.as_ref()), "non-string panic payload");
    }
}
