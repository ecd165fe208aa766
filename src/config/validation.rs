//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (intervals > 0, addresses parse)
//! - Check that timings fit together (hold outlasts the enter animation,
//!   request timeout outlasts a full payment poll, backend time included)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: TipjarConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::TipjarConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("{field} is not a valid socket address: {value}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("backend.base_url is not a valid URL: {0}")]
    InvalidBaseUrl(String),

    #[error("alerts.hold_ms ({hold_ms}) must exceed alerts.enter_ms ({enter_ms})")]
    HoldTooShort { hold_ms: u64, enter_ms: u64 },

    #[error("admin.api_key must be set when admin is enabled")]
    MissingApiKey,

    #[error("timeouts.request_secs ({request_secs}s) does not outlast a full payment poll ({budget_ms}ms)")]
    RequestTimeoutTooShort { request_secs: u64, budget_ms: u64 },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &TipjarConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if url::Url::parse(&config.backend.base_url).is_err() {
        errors.push(ValidationError::InvalidBaseUrl(config.backend.base_url.clone()));
    }

    let positive = [
        ("backend.request_timeout_secs", config.backend.request_timeout_secs),
        ("payment.poll_interval_ms", config.payment.poll_interval_ms),
        ("alerts.poll_interval_ms", config.alerts.poll_interval_ms),
        ("alerts.feed_limit", u64::from(config.alerts.feed_limit)),
        ("alerts.hold_ms", config.alerts.hold_ms),
        ("timeouts.request_secs", config.timeouts.request_secs),
    ];
    for (field, value) in positive {
        if value == 0 {
            errors.push(ValidationError::Zero { field });
        }
    }

    if config.alerts.hold_ms <= config.alerts.enter_ms {
        errors.push(ValidationError::HoldTooShort {
            hold_ms: config.alerts.hold_ms,
            enter_ms: config.alerts.enter_ms,
        });
    }

    if config.admin.enabled && config.admin.api_key.trim().is_empty() {
        errors.push(ValidationError::MissingApiKey);
    }

    let budget_ms = u64::try_from(config.payment_poll_budget().as_millis()).unwrap_or(u64::MAX);
    if config.timeouts.request_secs.saturating_mul(1000) <= budget_ms {
        errors.push(ValidationError::RequestTimeoutTooShort {
            request_secs: config.timeouts.request_secs,
            budget_ms,
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&TipjarConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = TipjarConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.alerts.poll_interval_ms = 0;
        config.admin.api_key = "  ".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::MissingApiKey));
        assert!(errors.contains(&ValidationError::Zero { field: "alerts.poll_interval_ms" }));
    }

    #[test]
    fn test_hold_must_outlast_enter_animation() {
        let mut config = TipjarConfig::default();
        config.alerts.hold_ms = 500;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::HoldTooShort { hold_ms: 500, enter_ms: 600 }]
        );
    }

    #[test]
    fn test_request_timeout_must_cover_payment_poll() {
        let mut config = TipjarConfig::default();
        config.timeouts.request_secs = 30;

        // 6 queries at 10s each plus 5 waits of 2s.
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::RequestTimeoutTooShort { request_secs: 30, budget_ms: 70_000 }]
        );
    }

    #[test]
    fn test_slow_backend_counts_against_request_timeout() {
        let mut config = TipjarConfig::default();
        config.backend.request_timeout_secs = 2;
        config.payment.poll_interval_ms = 20;
        config.timeouts.request_secs = 1;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::RequestTimeoutTooShort { request_secs: 1, budget_ms: 12_100 }]
        );

        config.timeouts.request_secs = 13;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_admin_key_optional_when_disabled() {
        let mut config = TipjarConfig::default();
        config.admin.enabled = false;
        config.admin.api_key.clear();
        assert!(validate_config(&config).is_ok());
    }
}
