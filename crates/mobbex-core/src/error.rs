//! Error taxonomy for the bootstrap and webhook phases.
//!
//! Bootstrap violations are non-fatal: they only prevent activation of the
//! integration and surface as admin notices, accumulated rather than
//! fail-fast. Webhook faults are caught at the router boundary and collapsed
//! into a normalized failure response; neither taxonomy ever escalates past
//! a diagnostic log entry.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gateway::GatewayId;

/// Classes of host-environment violations found during validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyErrorKind {
    /// A required host component is absent entirely.
    MissingDependency,
    /// The host is not served over TLS/HTTPS.
    InsecureTransport,
    /// The host platform is older than the minimum supported version.
    VersionMismatch,
    /// A required runtime extension (transport or codec) is unavailable.
    MissingExtension,
    /// The TLS library is absent, unidentifiable, or too old.
    WeakCrypto,
}

impl DependencyErrorKind {
    /// Stable name used in diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingDependency => "missing_dependency",
            Self::InsecureTransport => "insecure_transport",
            Self::VersionMismatch => "version_mismatch",
            Self::MissingExtension => "missing_extension",
            Self::WeakCrypto => "weak_crypto",
        }
    }
}

impl fmt::Display for DependencyErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single environment violation with its admin-facing message.
///
/// Issues keep the order the validator produced them in; the bootstrapper
/// relays each message verbatim to the notice sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyIssue {
    /// Violation class.
    pub kind: DependencyErrorKind,
    /// Human-readable message shown in the host's admin surface.
    pub message: String,
}

impl DependencyIssue {
    /// Creates an issue from a kind and message.
    pub fn new(kind: DependencyErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }
}

impl fmt::Display for DependencyIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// Faults occurring at the webhook transport boundary.
///
/// Both variants are terminal for a single inbound call: the router converts
/// them into `{ "result": false }` and logs one diagnostic entry. No retry,
/// no escalation; redelivery is the payment provider's responsibility.
#[derive(Debug, Error)]
pub enum WebhookFault {
    /// No active gateway is registered under the well-known identifier.
    #[error("no active gateway registered for '{0}'")]
    HandlerLookup(GatewayId),

    /// The gateway handler returned an error or panicked.
    #[error("gateway handler failed: {0:#}")]
    HandlerExecution(anyhow::Error),
}
