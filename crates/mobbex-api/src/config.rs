//! Configuration management for the Mobbex gateway bridge.

use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use mobbex_core::EnvSnapshot;
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.toml";

/// Complete service configuration with defaults, file, and environment
/// overrides.
///
/// Configuration is loaded in priority order:
/// 1. Environment variables (highest priority)
/// 2. Configuration file (`config.toml`)
/// 3. Built-in defaults (lowest priority)
///
/// The host-environment facts (`platform_*`, `tls_*`, extension
/// availability) describe the embedding platform; they feed the dependency
/// validator through [`Config::environment`]. Their defaults are
/// pessimistic on purpose: an undescribed deployment fails validation and
/// the integration stays inactive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Server
    /// Server bind address.
    ///
    /// Environment variable: `HOST`
    #[serde(default = "default_host", alias = "HOST")]
    pub host: String,
    /// Server bind port.
    ///
    /// Environment variable: `PORT`
    #[serde(default = "default_port", alias = "PORT")]
    pub port: u16,
    /// HTTP request timeout in seconds.
    ///
    /// Environment variable: `REQUEST_TIMEOUT`
    #[serde(default = "default_request_timeout", alias = "REQUEST_TIMEOUT")]
    pub request_timeout: u64,

    // Localization
    /// Optional locale overlay file for notice texts.
    ///
    /// Environment variable: `LOCALE_FILE`
    #[serde(default, alias = "LOCALE_FILE")]
    pub locale_file: Option<String>,

    // Host environment
    /// Host commerce platform is installed.
    ///
    /// Environment variable: `PLATFORM_INSTALLED`
    #[serde(default, alias = "PLATFORM_INSTALLED")]
    pub platform_installed: bool,
    /// Platform runtime accessor is available.
    ///
    /// Environment variable: `RUNTIME_ACCESSOR_AVAILABLE`
    #[serde(default, alias = "RUNTIME_ACCESSOR_AVAILABLE")]
    pub runtime_accessor_available: bool,
    /// Host is served over TLS/HTTPS.
    ///
    /// Environment variable: `TLS_ENABLED`
    #[serde(default, alias = "TLS_ENABLED")]
    pub tls_enabled: bool,
    /// Reported host platform version.
    ///
    /// Environment variable: `PLATFORM_VERSION`
    #[serde(default, alias = "PLATFORM_VERSION")]
    pub platform_version: Option<String>,
    /// cURL-equivalent transport extension is available.
    ///
    /// Environment variable: `CURL_AVAILABLE`
    #[serde(default, alias = "CURL_AVAILABLE")]
    pub curl_available: bool,
    /// JSON codec is available.
    ///
    /// Environment variable: `JSON_CODEC_AVAILABLE`
    #[serde(default, alias = "JSON_CODEC_AVAILABLE")]
    pub json_codec_available: bool,
    /// TLS library version text, e.g. `"OpenSSL 1.1.1k  25 Mar 2021"`.
    ///
    /// Environment variable: `TLS_LIBRARY_VERSION`
    #[serde(default, alias = "TLS_LIBRARY_VERSION")]
    pub tls_library_version: Option<String>,

    // Logging
    /// Log level configuration.
    ///
    /// Environment variable: `RUST_LOG`
    #[serde(default = "default_log_level", alias = "RUST_LOG")]
    pub rust_log: String,
}

impl Config {
    /// Loads configuration from defaults, `config.toml`, and environment
    /// variable overrides.
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(""));

        let config: Self = figment.extract().context("Failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Validates cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        self.server_addr()?;
        if self.request_timeout == 0 {
            anyhow::bail!("request_timeout must be greater than zero");
        }
        Ok(())
    }

    /// Bind address assembled from `host` and `port`.
    pub fn server_addr(&self) -> Result<SocketAddr> {
        SocketAddr::from_str(&format!("{}:{}", self.host, self.port))
            .with_context(|| format!("Invalid server address {}:{}", self.host, self.port))
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Environment snapshot handed to the dependency validator.
    pub fn environment(&self) -> EnvSnapshot {
        EnvSnapshot {
            platform_installed: self.platform_installed,
            runtime_accessor_available: self.runtime_accessor_available,
            tls_enabled: self.tls_enabled,
            platform_version: self.platform_version.clone(),
            curl_available: self.curl_available,
            json_codec_available: self.json_codec_available,
            tls_library_version: self.tls_library_version.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
            locale_file: None,
            platform_installed: false,
            runtime_accessor_available: false,
            tls_enabled: false,
            platform_version: None,
            curl_available: false,
            json_codec_available: false,
            tls_library_version: None,
            rust_log: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    crate::server::DEFAULT_REQUEST_TIMEOUT.as_secs()
}

fn default_log_level() -> String {
    "info,mobbex=debug,tower_http=debug".to_string()
}
