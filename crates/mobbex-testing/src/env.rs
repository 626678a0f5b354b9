//! Environment snapshot fixtures.

use mobbex_core::EnvSnapshot;

/// Environment that satisfies all seven validation checks.
pub fn satisfied_env() -> EnvSnapshot {
    EnvSnapshot {
        platform_installed: true,
        runtime_accessor_available: true,
        tls_enabled: true,
        platform_version: Some("4.2.2".to_string()),
        curl_available: true,
        json_codec_available: true,
        tls_library_version: Some("OpenSSL 1.1.1k  25 Mar 2021".to_string()),
    }
}

/// Environment that fails every check: nothing installed, nothing secure.
pub fn bare_env() -> EnvSnapshot {
    EnvSnapshot::default()
}
