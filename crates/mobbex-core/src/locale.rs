//! Notice message catalog with a best-effort localization overlay.
//!
//! Every message the validator can emit has a built-in English text. A
//! deployment may provide a TOML file mapping message keys to translated
//! strings; loading it is best-effort, mirroring how the original host
//! loaded its text domain: unknown keys are ignored and a missing or broken
//! file only produces a debug log, never a failure.

use std::{collections::HashMap, path::Path};

use figment::{
    providers::{Format, Toml},
    Figment,
};
use tracing::debug;

/// Keys for every admin-facing message this layer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// Host commerce platform not installed.
    PlatformMissing,
    /// Platform runtime accessor unavailable.
    RuntimeAccessorMissing,
    /// Host not served over HTTPS.
    InsecureTransport,
    /// Platform older than the minimum supported version.
    PlatformTooOld,
    /// cURL-equivalent extension missing.
    CurlMissing,
    /// JSON codec missing.
    JsonMissing,
    /// TLS library absent, unidentifiable, or below 1.0.1.
    WeakCrypto,
}

impl MessageKey {
    /// All keys, in the order the validator checks them.
    pub const ALL: [Self; 7] = [
        Self::PlatformMissing,
        Self::RuntimeAccessorMissing,
        Self::InsecureTransport,
        Self::PlatformTooOld,
        Self::CurlMissing,
        Self::JsonMissing,
        Self::WeakCrypto,
    ];

    /// Stable key used in overlay files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PlatformMissing => "platform_missing",
            Self::RuntimeAccessorMissing => "runtime_accessor_missing",
            Self::InsecureTransport => "insecure_transport",
            Self::PlatformTooOld => "platform_too_old",
            Self::CurlMissing => "curl_missing",
            Self::JsonMissing => "json_missing",
            Self::WeakCrypto => "weak_crypto",
        }
    }

    /// Built-in English text.
    const fn default_text(self) -> &'static str {
        match self {
            Self::PlatformMissing => "WooCommerce needs to be installed and activated.",
            Self::RuntimeAccessorMissing => "Mobbex requires WooCommerce to be activated",
            Self::InsecureTransport => {
                "Your site needs to be served via HTTPS to communicate securely with Mobbex."
            },
            Self::PlatformTooOld => "Mobbex requires WooCommerce version 2.6 or greater",
            Self::CurlMissing => {
                "Mobbex requires the cURL extension to be installed on your server"
            },
            Self::JsonMissing => {
                "Mobbex requires the JSON extension to be installed on your server"
            },
            Self::WeakCrypto => "Mobbex requires OpenSSL >= 1.0.1 to be installed on your server",
        }
    }
}

/// Resolves message keys to admin-facing text.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    overrides: HashMap<MessageKey, String>,
}

impl MessageCatalog {
    /// Creates a catalog serving the built-in English texts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the text for a key, preferring any loaded override.
    pub fn get(&self, key: MessageKey) -> &str {
        self.overrides.get(&key).map_or_else(|| key.default_text(), String::as_str)
    }

    /// Applies translated texts by key name. Unknown names are ignored.
    pub fn apply_overrides(&mut self, texts: HashMap<String, String>) -> usize {
        let mut applied = 0;
        for key in MessageKey::ALL {
            if let Some(text) = texts.get(key.as_str()) {
                self.overrides.insert(key, text.clone());
                applied += 1;
            }
        }
        applied
    }

    /// Loads an overlay TOML file of `key = "text"` pairs.
    pub fn load_overlay(&mut self, path: &Path) -> anyhow::Result<usize> {
        let texts: HashMap<String, String> =
            Figment::from(Toml::file_exact(path)).extract()?;
        Ok(self.apply_overrides(texts))
    }

    /// Loads an overlay, swallowing any failure.
    ///
    /// Localization is not safety-critical; a missing or malformed file
    /// leaves the built-in texts in place.
    pub fn load_overlay_best_effort(&mut self, path: &Path) {
        match self.load_overlay(path) {
            Ok(applied) => debug!(path = %path.display(), applied, "locale overlay loaded"),
            Err(error) => {
                debug!(path = %path.display(), %error, "locale overlay unavailable, using built-in texts");
            },
        }
    }
}
