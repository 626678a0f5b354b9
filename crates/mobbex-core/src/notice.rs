//! Admin notice sinks.
//!
//! Notices are the only user-visible side effect of a failed bootstrap. The
//! sink is fire-and-forget and best-effort: implementations must not block
//! the caller and must not propagate failures back into startup.

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// Severity of an admin notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Condition preventing activation of the integration.
    Error,
    /// Degraded but non-blocking condition.
    Warning,
    /// Informational message.
    Info,
}

impl Severity {
    /// Stable name used in diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Destination for human-readable admin messages.
///
/// Implementations surface the message in the host's admin UI or an
/// equivalent channel. Delivery is best-effort; callers never observe a
/// sink failure.
#[async_trait::async_trait]
pub trait NoticeSink: Send + Sync + fmt::Debug {
    /// Surfaces a message at the given severity.
    async fn notify(&self, severity: Severity, message: &str);
}

/// Sink that relays notices to the tracing pipeline.
///
/// Used in deployments where no richer admin surface is wired up; the
/// notice still reaches the operator through the service logs.
#[derive(Debug, Default)]
pub struct TracingNoticeSink;

impl TracingNoticeSink {
    /// Creates a new tracing-backed sink.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl NoticeSink for TracingNoticeSink {
    async fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Error => error!(notice = message, "admin notice"),
            Severity::Warning => warn!(notice = message, "admin notice"),
            Severity::Info => info!(notice = message, "admin notice"),
        }
    }
}

/// Sink that discards all notices.
#[derive(Debug, Default)]
pub struct NoOpNoticeSink;

impl NoOpNoticeSink {
    /// Creates a new discarding sink.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl NoticeSink for NoOpNoticeSink {
    async fn notify(&self, _severity: Severity, _message: &str) {}
}

/// Sink that forwards each notice to multiple subscribers concurrently.
#[derive(Debug, Clone, Default)]
pub struct MulticastNoticeSink {
    sinks: Vec<Arc<dyn NoticeSink>>,
}

impl MulticastNoticeSink {
    /// Creates a multicast sink with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a subscriber.
    pub fn add_subscriber(&mut self, sink: Arc<dyn NoticeSink>) {
        self.sinks.push(sink);
    }

    /// Number of subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sinks.len()
    }
}

#[async_trait::async_trait]
impl NoticeSink for MulticastNoticeSink {
    async fn notify(&self, severity: Severity, message: &str) {
        // Failures in one subscriber must not starve the others.
        let futures = self.sinks.iter().map(|sink| sink.notify(severity, message));
        futures::future::join_all(futures).await;
    }
}
