//! Metrics collection and exposition.
//!
//! # Metrics
//! - `tipjar_payment_checks_total` (counter): status queries by outcome
//! - `tipjar_payment_outcomes_total` (counter): terminal confirmations by result
//! - `tipjar_feed_polls_total` (counter): tip feed polls by result
//! - `tipjar_alerts_presented_total` (counter): alerts shown by source
//! - `tipjar_overlay_subscribers` (gauge): connected overlay websockets
//!
//! Recording is a no-op until `init_metrics` installs the exporter.

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::payments::{FailureReason, PaymentState};

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

fn state_label(state: &PaymentState) -> &'static str {
    match state {
        PaymentState::Checking => "pending",
        PaymentState::Success { .. } => "paid",
        PaymentState::Failed { reason } => match reason {
            FailureReason::NoSession => "no_session",
            FailureReason::Expired => "expired",
            FailureReason::TimedOut => "timed_out",
            FailureReason::Transport => "error",
        },
    }
}

pub fn record_payment_check(state: &PaymentState) {
    counter!("tipjar_payment_checks_total", "outcome" => state_label(state)).increment(1);
}

pub fn record_payment_outcome(state: &PaymentState) {
    counter!("tipjar_payment_outcomes_total", "result" => state_label(state)).increment(1);
}

/// `result` is one of `new`, `unchanged`, `empty`, `error`.
pub fn record_feed_poll(result: &'static str) {
    counter!("tipjar_feed_polls_total", "result" => result).increment(1);
}

pub fn record_alert_presented(source: &'static str) {
    counter!("tipjar_alerts_presented_total", "source" => source).increment(1);
}

pub fn overlay_subscriber_connected() {
    gauge!("tipjar_overlay_subscribers").increment(1.0);
}

pub fn overlay_subscriber_disconnected() {
    gauge!("tipjar_overlay_subscribers").decrement(1.0);
}
