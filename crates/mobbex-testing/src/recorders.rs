//! Recording collaborator doubles.
//!
//! Capture every interaction so tests can assert on notice content,
//! registration counts, and the all-or-nothing activation gate.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use chrono::{DateTime, Utc};
use mobbex_core::{GatewayId, NoticeSink, RouteRegistrar, Severity};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// A notice as observed by [`RecordingNoticeSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedNotice {
    /// Severity the notice was emitted with.
    pub severity: Severity,
    /// Message text.
    pub message: String,
    /// When the sink observed it.
    pub at: DateTime<Utc>,
}

/// Notice sink that stores everything it is told.
#[derive(Debug, Default)]
pub struct RecordingNoticeSink {
    notices: Mutex<Vec<RecordedNotice>>,
}

impl RecordingNoticeSink {
    /// Creates an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices observed so far, in emission order.
    pub fn notices(&self) -> Vec<RecordedNotice> {
        self.notices.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of notices observed.
    pub fn count(&self) -> usize {
        self.notices.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Messages of all notices at the given severity.
    pub fn messages_at(&self, severity: Severity) -> Vec<String> {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|notice| notice.severity == severity)
            .map(|notice| notice.message.clone())
            .collect()
    }
}

#[async_trait::async_trait]
impl NoticeSink for RecordingNoticeSink {
    async fn notify(&self, severity: Severity, message: &str) {
        self.notices.lock().unwrap_or_else(|e| e.into_inner()).push(RecordedNotice {
            severity,
            message: message.to_string(),
            at: Utc::now(),
        });
    }
}

/// Route registrar that records registrations instead of arming a router.
#[derive(Debug, Default)]
pub struct RecordingRegistrar {
    registered: Mutex<Vec<GatewayId>>,
}

impl RecordingRegistrar {
    /// Creates an empty recording registrar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateways whose webhook route was registered, in order.
    pub fn registered(&self) -> Vec<GatewayId> {
        self.registered.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Whether the webhook route was registered for `gateway`.
    pub fn is_registered(&self, gateway: GatewayId) -> bool {
        self.registered.lock().unwrap_or_else(|e| e.into_inner()).contains(&gateway)
    }
}

impl RouteRegistrar for RecordingRegistrar {
    fn register_webhook(&self, gateway: GatewayId) {
        self.registered.lock().unwrap_or_else(|e| e.into_inner()).push(gateway);
    }
}

/// Tracing layer that counts ERROR-level events.
///
/// Attach it to a per-future subscriber (via
/// `tracing::instrument::WithSubscriber`) to assert how many failure
/// entries a code path emits. Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct ErrorCountLayer {
    errors: Arc<AtomicUsize>,
}

impl ErrorCountLayer {
    /// Creates a layer with a zeroed counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ERROR events observed so far.
    pub fn count(&self) -> usize {
        self.errors.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for ErrorCountLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if event.metadata().level() == &Level::ERROR {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }
    }
}
