//! Gateway identity, registry, and the webhook exchange types.
//!
//! The payment gateway itself lives outside this workspace; this module
//! defines the seam it plugs into. Lookup is keyed by [`GatewayId`], a
//! closed enum rather than a free-form string, so a registry miss is an
//! explicit, typed outcome instead of a stringly-typed lookup failure.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, RwLock},
};

use serde::{Deserialize, Serialize};

/// Well-known identifiers for registrable payment gateways.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayId {
    /// The Mobbex payment gateway.
    Mobbex,
}

impl GatewayId {
    /// Stable wire name, matching the original registry key.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mobbex => "mobbex",
        }
    }
}

impl fmt::Display for GatewayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inbound provider notification, as handed over by the host transport.
///
/// This layer treats the contents as opaque: headers and body are carried
/// through to the gateway handler without interpretation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookRequest {
    /// HTTP method of the inbound call.
    pub method: String,
    /// Request headers, lower-cased names.
    pub headers: HashMap<String, String>,
    /// Leniently parsed JSON body; `Null` when the body was not decodable.
    pub params: serde_json::Value,
}

impl WebhookRequest {
    /// Creates a request bag.
    pub fn new(
        method: impl Into<String>,
        headers: HashMap<String, String>,
        params: serde_json::Value,
    ) -> Self {
        Self { method: method.into(), headers, params }
    }
}

/// Normalized webhook response. `result` is always present; whatever else
/// the gateway returned rides along flattened beside it.
///
/// The payload is a JSON object map rather than a free-form value: serde
/// can only flatten maps, so holding anything else here would make the
/// response unserializable at the transport. [`WebhookResponse::with_payload`]
/// normalizes non-object values instead of rejecting them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookResponse {
    /// Whether the gateway accepted the notification.
    pub result: bool,
    /// Gateway-provided payload fields, serialized inline with `result`.
    /// An empty map flattens to no additional fields.
    #[serde(flatten, default)]
    pub payload: serde_json::Map<String, serde_json::Value>,
}

impl WebhookResponse {
    /// Successful acknowledgement with no extra payload.
    pub fn ok() -> Self {
        Self { result: true, payload: serde_json::Map::new() }
    }

    /// The normalized failure response, `{ "result": false }`.
    pub fn failure() -> Self {
        Self { result: false, payload: serde_json::Map::new() }
    }

    /// Successful response carrying a gateway payload.
    ///
    /// An object's fields ride beside `result`; `Null` adds nothing; any
    /// other value (string, number, array, bool) is carried under a `data`
    /// key so the response body stays a well-formed JSON object.
    pub fn with_payload(payload: serde_json::Value) -> Self {
        let payload = match payload {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => serde_json::Map::new(),
            other => {
                let mut map = serde_json::Map::new();
                map.insert("data".to_string(), other);
                map
            },
        };
        Self { result: true, payload }
    }
}

/// Handler capability a registered payment gateway exposes to this layer.
///
/// Implementations own the actual webhook semantics (transaction lookup,
/// order transitions); the router only forwards the request and relays the
/// response. Errors returned here never reach the host transport.
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Processes a provider webhook notification.
    async fn handle_webhook(&self, request: WebhookRequest) -> anyhow::Result<WebhookResponse>;
}

/// Registry of active payment gateways.
///
/// The bootstrapper populates it exactly once during startup; afterwards it
/// is effectively read-only. The registry owns the gateway instances; the
/// webhook router performs a fresh lookup per request and holds no
/// long-lived handle, so a host reload can never leave it with a stale one.
#[derive(Default)]
pub struct GatewayRegistry {
    gateways: RwLock<HashMap<GatewayId, Arc<dyn PaymentGateway>>>,
}

impl GatewayRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a gateway under its identifier, replacing any previous one.
    pub fn register(&self, id: GatewayId, gateway: Arc<dyn PaymentGateway>) {
        self.write_lock().insert(id, gateway);
    }

    /// Looks up the gateway registered under `id`.
    pub fn find(&self, id: GatewayId) -> Option<Arc<dyn PaymentGateway>> {
        self.read_lock().get(&id).cloned()
    }

    /// Whether a gateway is registered under `id`.
    pub fn contains(&self, id: GatewayId) -> bool {
        self.read_lock().contains_key(&id)
    }

    /// Number of registered gateways.
    pub fn len(&self) -> usize {
        self.read_lock().len()
    }

    /// Whether no gateway is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_lock(
        &self,
    ) -> std::sync::RwLockReadGuard<'_, HashMap<GatewayId, Arc<dyn PaymentGateway>>> {
        self.gateways.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write_lock(
        &self,
    ) -> std::sync::RwLockWriteGuard<'_, HashMap<GatewayId, Arc<dyn PaymentGateway>>> {
        self.gateways.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl fmt::Debug for GatewayRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<GatewayId> = self.read_lock().keys().copied().collect();
        f.debug_struct("GatewayRegistry").field("gateways", &ids).finish()
    }
}
