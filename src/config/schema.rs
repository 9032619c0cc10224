//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the gateway's
//! TOML configuration file. Every field has a default so a minimal (or
//! absent) config still yields a runnable gateway.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway process.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Public domain this gateway serves (also the `www.` variant).
    pub host: String,

    /// Contact address handed to the certificate provisioner.
    pub email: String,

    /// Core gateway settings (display name, scheme document path).
    pub gateway: CoreConfig,

    /// HSTS policy settings.
    pub hsts: HstsConfig,

    /// Listener configuration (plain + TLS addresses).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Core gateway settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Display name, used as the upstream client name in diagnostics.
    pub name: String,

    /// Path to the declarative scheme document (JSON).
    pub scheme_path: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            name: "gateway".to_string(),
            scheme_path: ".scheme".to_string(),
        }
    }
}

/// HSTS policy settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HstsConfig {
    /// `max-age` value for the Strict-Transport-Security header, seconds.
    pub max_age: u64,
}

impl Default for HstsConfig {
    fn default() -> Self {
        Self { max_age: 31_536_000 }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Plaintext bind address.
    pub http_address: String,

    /// TLS bind address, used only when `tls` is configured.
    pub https_address: String,

    /// Certificate material for the TLS leg. When absent, only the
    /// plaintext listener is served.
    pub tls: Option<TlsConfig>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            http_address: "0.0.0.0:80".to_string(),
            https_address: "0.0.0.0:443".to_string(),
            tls: None,
        }
    }
}

/// TLS certificate material, as provisioned for the configured host and
/// its `www.` variant.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total request/response timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Enable the Prometheus metrics exporter.
    pub metrics_enabled: bool,

    /// Metrics exporter bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            email: String::new(),
            gateway: CoreConfig::default(),
            hsts: HstsConfig::default(),
            listener: ListenerConfig::default(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}
