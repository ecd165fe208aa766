//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the tipjar service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TipjarConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// REST backend the pollers talk to.
    pub backend: BackendConfig,

    /// Payment confirmation polling.
    pub payment: PaymentConfig,

    /// Overlay alert feed and display timings.
    pub alerts: AlertsConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Operator endpoints.
    pub admin: AdminConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl TipjarConfig {
    /// Longest a full payment confirmation can take: every status query
    /// hitting the backend timeout plus every delay between them.
    pub fn payment_poll_budget(&self) -> Duration {
        let queries = self.payment.max_attempts.saturating_add(1);
        self.backend
            .request_timeout()
            .saturating_mul(queries)
            .saturating_add(self.payment.poll_interval().saturating_mul(self.payment.max_attempts))
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Backend API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the REST backend (without the `/api` prefix).
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8001".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl BackendConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Payment confirmation polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PaymentConfig {
    /// Retries allowed after the first status query.
    pub max_attempts: u32,

    /// Delay between status queries in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            poll_interval_ms: 2000,
        }
    }
}

impl PaymentConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Overlay alert configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AlertsConfig {
    /// Run the recent-tips poller.
    pub enabled: bool,

    /// Tip feed polling interval in milliseconds.
    pub poll_interval_ms: u64,

    /// Number of tips requested per poll. Only the newest is used.
    pub feed_limit: u32,

    /// Time from `present` until the exit animation starts.
    pub hold_ms: u64,

    /// Enter animation length.
    pub enter_ms: u64,

    /// Exit animation length.
    pub exit_ms: u64,

    /// Username used when a direct trigger omits one.
    pub default_username: String,

    /// Username shown for feed tips without a tipper name.
    pub anonymous_name: String,

    /// Footer line shown under every alert.
    pub detail_text: String,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            poll_interval_ms: 3000,
            feed_limit: 1,
            hold_ms: 6000,
            enter_ms: 600,
            exit_ms: 400,
            default_username: "EdgeRunner".to_string(),
            anonymous_name: "Anonymous".to_string(),
            detail_text: "Night City // Live Data Feed".to_string(),
        }
    }
}

impl AlertsConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn hold(&self) -> Duration {
        Duration::from_millis(self.hold_ms)
    }

    pub fn enter(&self) -> Duration {
        Duration::from_millis(self.enter_ms)
    }

    pub fn exit(&self) -> Duration {
        Duration::from_millis(self.exit_ms)
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    ///
    /// `/success` holds the request open for a whole payment poll, so this
    /// must outlast [`TipjarConfig::payment_poll_budget`].
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 90 }
    }
}

/// Operator endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Mount the `/admin` routes.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            // WARNING: This is a placeholder! Change this in production.
            api_key: "CHANGE_ME_IN_PRODUCTION".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
