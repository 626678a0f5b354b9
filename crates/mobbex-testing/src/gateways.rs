//! Stub payment gateways for exercising the webhook boundary.

use std::sync::Mutex;

use anyhow::anyhow;
use mobbex_core::{PaymentGateway, WebhookRequest, WebhookResponse};

/// Gateway returning a canned response and recording every request it saw.
#[derive(Debug)]
pub struct StaticGateway {
    response: WebhookResponse,
    requests: Mutex<Vec<WebhookRequest>>,
}

impl StaticGateway {
    /// Gateway that acknowledges with `{ "result": true }`.
    pub fn acknowledging() -> Self {
        Self::with_response(WebhookResponse::ok())
    }

    /// Gateway that always returns `response` unchanged.
    pub fn with_response(response: WebhookResponse) -> Self {
        Self { response, requests: Mutex::new(Vec::new()) }
    }

    /// Requests received so far, in arrival order.
    pub fn received(&self) -> Vec<WebhookRequest> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of requests received so far.
    pub fn received_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait::async_trait]
impl PaymentGateway for StaticGateway {
    async fn handle_webhook(&self, request: WebhookRequest) -> anyhow::Result<WebhookResponse> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).push(request);
        Ok(self.response.clone())
    }
}

/// Gateway whose handler always returns an error.
#[derive(Debug, Default)]
pub struct FailingGateway;

#[async_trait::async_trait]
impl PaymentGateway for FailingGateway {
    async fn handle_webhook(&self, _request: WebhookRequest) -> anyhow::Result<WebhookResponse> {
        Err(anyhow!("transaction lookup failed"))
    }
}

/// Gateway whose handler panics, for testing the router's containment.
#[derive(Debug, Default)]
pub struct PanickingGateway;

#[async_trait::async_trait]
impl PaymentGateway for PanickingGateway {
    async fn handle_webhook(&self, _request: WebhookRequest) -> anyhow::Result<WebhookResponse> {
        panic!("gateway handler blew up");
    }
}
