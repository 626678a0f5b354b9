//! Host-environment probing.
//!
//! The validator never inspects the process environment directly; it reads
//! through [`EnvironmentProbe`], a read-only view of the facts the embedding
//! host reports about itself. Production deployments describe the host in
//! configuration, which deserializes into an [`EnvSnapshot`]; tests build
//! snapshots by hand.

use serde::{Deserialize, Serialize};

/// Read-only queries against the hosting environment.
///
/// All methods are pure with respect to a given environment state, so the
/// validator stays deterministic and safe to call repeatedly.
pub trait EnvironmentProbe: Send + Sync {
    /// Whether the host commerce platform is installed and loadable.
    fn platform_installed(&self) -> bool;

    /// Whether the platform's runtime accessor function is available.
    fn runtime_accessor_available(&self) -> bool;

    /// Whether the host is served over TLS/HTTPS.
    fn tls_enabled(&self) -> bool;

    /// Reported platform version, when the platform exposes one.
    fn platform_version(&self) -> Option<String>;

    /// Whether a cURL-equivalent transport extension is available.
    fn curl_available(&self) -> bool;

    /// Whether a JSON codec is available.
    fn json_codec_available(&self) -> bool;

    /// Raw TLS library version text, e.g. `"OpenSSL 1.1.1k  25 Mar 2021"`.
    ///
    /// `None` when no OpenSSL-compatible library is present. Callers must
    /// tolerate arbitrary, unparseable text here.
    fn tls_library_version(&self) -> Option<String>;
}

/// Concrete environment description supplied by deploy configuration.
///
/// Defaults are deliberately pessimistic: an undescribed host fails every
/// check, so the integration stays inactive until the deployment states its
/// environment explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvSnapshot {
    /// Host commerce platform is installed.
    #[serde(default)]
    pub platform_installed: bool,
    /// Platform runtime accessor is available.
    #[serde(default)]
    pub runtime_accessor_available: bool,
    /// Host is served over TLS/HTTPS.
    #[serde(default)]
    pub tls_enabled: bool,
    /// Reported platform version.
    #[serde(default)]
    pub platform_version: Option<String>,
    /// cURL-equivalent transport extension is available.
    #[serde(default)]
    pub curl_available: bool,
    /// JSON codec is available.
    #[serde(default)]
    pub json_codec_available: bool,
    /// TLS library version text.
    #[serde(default)]
    pub tls_library_version: Option<String>,
}

impl EnvironmentProbe for EnvSnapshot {
    fn platform_installed(&self) -> bool {
        self.platform_installed
    }

    fn runtime_accessor_available(&self) -> bool {
        self.runtime_accessor_available
    }

    fn tls_enabled(&self) -> bool {
        self.tls_enabled
    }

    fn platform_version(&self) -> Option<String> {
        self.platform_version.clone()
    }

    fn curl_available(&self) -> bool {
        self.curl_available
    }

    fn json_codec_available(&self) -> bool {
        self.json_codec_available
    }

    fn tls_library_version(&self) -> Option<String> {
        self.tls_library_version.clone()
    }
}
