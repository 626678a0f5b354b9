//! Dependency validation gate.
//!
//! Decides whether the hosting environment satisfies every precondition for
//! safe activation of the integration. All checks run unconditionally, with
//! no short-circuiting on the first failure, so an administrator sees every
//! problem at once instead of fixing them one redeploy at a time.

use std::{cmp::Ordering, sync::LazyLock};

use regex::Regex;

use crate::{
    env::EnvironmentProbe,
    error::{DependencyErrorKind, DependencyIssue},
    locale::{MessageCatalog, MessageKey},
};

/// Minimum supported host platform version.
pub const MIN_PLATFORM_VERSION: &str = "2.6";

/// Minimum supported TLS library version.
pub const MIN_TLS_LIBRARY_VERSION: &str = "1.0.1";

static TLS_LIBRARY_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:Libre|Open)SSL ([\d.]+)").expect("hardcoded regex"));

/// Ordered collection of environment violations.
///
/// Empty if and only if the environment is acceptable. Built fresh per
/// validation run and never mutated after return.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    issues: Vec<DependencyIssue>,
}

impl ValidationResult {
    /// Whether the environment passed every check.
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    /// The violations, in check order.
    pub fn issues(&self) -> &[DependencyIssue] {
        &self.issues
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Whether there are no violations.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Whether any violation has the given kind.
    pub fn contains_kind(&self, kind: DependencyErrorKind) -> bool {
        self.issues.iter().any(|issue| issue.kind == kind)
    }

    fn push(&mut self, kind: DependencyErrorKind, message: &str) {
        self.issues.push(DependencyIssue::new(kind, message));
    }
}

impl<'a> IntoIterator for &'a ValidationResult {
    type IntoIter = std::slice::Iter<'a, DependencyIssue>;
    type Item = &'a DependencyIssue;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}

/// Pure check of host-environment preconditions.
///
/// Deterministic given the probe's state and free of side effects; safe to
/// call any number of times.
pub struct DependencyValidator<'a> {
    probe: &'a dyn EnvironmentProbe,
    catalog: &'a MessageCatalog,
}

impl<'a> DependencyValidator<'a> {
    /// Creates a validator over an environment probe and message catalog.
    pub fn new(probe: &'a dyn EnvironmentProbe, catalog: &'a MessageCatalog) -> Self {
        Self { probe, catalog }
    }

    /// Runs every precondition check and returns the accumulated result.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if !self.probe.platform_installed() {
            result.push(
                DependencyErrorKind::MissingDependency,
                self.catalog.get(MessageKey::PlatformMissing),
            );
        }

        if !self.probe.runtime_accessor_available() {
            result.push(
                DependencyErrorKind::MissingDependency,
                self.catalog.get(MessageKey::RuntimeAccessorMissing),
            );
        }

        if !self.probe.tls_enabled() {
            result.push(
                DependencyErrorKind::InsecureTransport,
                self.catalog.get(MessageKey::InsecureTransport),
            );
        }

        let platform_version = self.probe.platform_version();
        if !version_at_least(platform_version.as_deref(), MIN_PLATFORM_VERSION) {
            result.push(
                DependencyErrorKind::VersionMismatch,
                self.catalog.get(MessageKey::PlatformTooOld),
            );
        }

        if !self.probe.curl_available() {
            result.push(
                DependencyErrorKind::MissingExtension,
                self.catalog.get(MessageKey::CurlMissing),
            );
        }

        if !self.probe.json_codec_available() {
            result.push(
                DependencyErrorKind::MissingExtension,
                self.catalog.get(MessageKey::JsonMissing),
            );
        }

        self.check_tls_library(&mut result);

        result
    }

    /// TLS library check, kept as three accumulating sub-checks.
    ///
    /// Matches the original behavior: presence, parseability, and minimum
    /// version each append the same warning independently, and an absent or
    /// unparseable version string fails the affected sub-checks without ever
    /// faulting the validator itself.
    fn check_tls_library(&self, result: &mut ValidationResult) {
        let warning = self.catalog.get(MessageKey::WeakCrypto);
        let text = self.probe.tls_library_version();

        if text.is_none() {
            result.push(DependencyErrorKind::WeakCrypto, warning);
        }

        let captured = text.as_deref().and_then(extract_tls_library_version);
        if captured.is_none() {
            result.push(DependencyErrorKind::WeakCrypto, warning);
        }

        if !version_at_least(captured, MIN_TLS_LIBRARY_VERSION) {
            result.push(DependencyErrorKind::WeakCrypto, warning);
        }
    }
}

/// Extracts the dotted version number from an OpenSSL-style version string.
///
/// Accepts both `OpenSSL` and `LibreSSL` prefixes, anchored at the start of
/// the text. Returns `None` for anything else.
fn extract_tls_library_version(text: &str) -> Option<&str> {
    TLS_LIBRARY_VERSION_RE
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
        .filter(|version| !version.is_empty())
}

/// Whether `version` compares at least `min`. Absent versions always fail.
fn version_at_least(version: Option<&str>, min: &str) -> bool {
    version.is_some_and(|v| compare_versions(v, min) != Ordering::Less)
}

/// Compares dotted numeric version strings segment by segment.
///
/// Missing segments count as zero, so `"1.0" == "1.0.0"`. Non-numeric
/// segments compare as zero rather than failing, since probe input is
/// arbitrary text.
fn compare_versions(a: &str, b: &str) -> Ordering {
    let parse = |s: &str| -> Vec<u64> {
        s.split('.').map(|segment| segment.parse::<u64>().unwrap_or(0)).collect()
    };
    let (a, b) = (parse(a), parse(b));
    let width = a.len().max(b.len());

    for i in 0..width {
        let (x, y) = (a.get(i).copied().unwrap_or(0), b.get(i).copied().unwrap_or(0));
        match x.cmp(&y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}
