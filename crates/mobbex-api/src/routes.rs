//! Route arming table.
//!
//! The axum router is built unconditionally at startup, but the webhook
//! endpoint only answers once the bootstrapper has registered it. This
//! table is the [`RouteRegistrar`] the bootstrapper writes to and the
//! handler reads from, which keeps the all-or-nothing activation gate
//! observable at the HTTP layer: an unarmed route answers 404 exactly as
//! if it had never been exposed.

use std::sync::atomic::{AtomicBool, Ordering};

use mobbex_core::{GatewayId, RouteRegistrar};
use tracing::info;

/// Armed/unarmed state of the routes this layer can expose.
///
/// Written once during single-threaded startup, read per request.
#[derive(Debug, Default)]
pub struct RouteTable {
    webhook: AtomicBool,
}

impl RouteTable {
    /// Creates a table with every route unarmed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the webhook endpoint has been registered.
    pub fn webhook_armed(&self) -> bool {
        self.webhook.load(Ordering::Acquire)
    }
}

impl RouteRegistrar for RouteTable {
    fn register_webhook(&self, gateway: GatewayId) {
        self.webhook.store(true, Ordering::Release);
        info!(gateway = %gateway, "webhook route armed");
    }
}
