//! Payment confirmation polling.

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::time::sleep;

use crate::api::{ApiResult, CheckoutStatus};
use crate::config::PaymentConfig;
use crate::observability::metrics;
use crate::payments::types::{FailureReason, PaymentState};

/// Anything that can report the status of a checkout session.
#[async_trait]
pub trait CheckoutStatusSource: Send + Sync {
    async fn checkout_status(&self, session_id: &str) -> ApiResult<CheckoutStatus>;
}

/// Polls a checkout session until it is paid, expired, or the budget runs out.
///
/// One poller confirms one session; it is not restarted.
pub struct PaymentConfirmationPoller<S> {
    source: S,
    config: PaymentConfig,
    state: watch::Sender<PaymentState>,
}

impl<S: CheckoutStatusSource> PaymentConfirmationPoller<S> {
    pub fn new(source: S, config: PaymentConfig) -> Self {
        let (state, _) = watch::channel(PaymentState::Checking);
        Self {
            source,
            config,
            state,
        }
    }

    /// Observe state changes, starting from `Checking`.
    pub fn subscribe(&self) -> watch::Receiver<PaymentState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> PaymentState {
        self.state.borrow().clone()
    }

    /// Run to a terminal state.
    pub async fn run(&self, session_id: Option<&str>) -> PaymentState {
        let session_id = match session_id.map(str::trim).filter(|s| !s.is_empty()) {
            Some(id) => id,
            None => {
                tracing::warn!("Payment confirmation started without a session ID");
                return self.finish(PaymentState::Failed {
                    reason: FailureReason::NoSession,
                });
            }
        };

        tracing::info!(
            session_id,
            max_attempts = self.config.max_attempts,
            "Confirming payment"
        );

        let mut attempt = 0;
        loop {
            let state = self.check_status(session_id, attempt).await;
            if state.is_terminal() {
                return self.finish(state);
            }
            sleep(self.config.poll_interval()).await;
            attempt += 1;
        }
    }

    /// Query the session once and decide the next state.
    ///
    /// Returns `Checking` when the caller should query again with
    /// `attempt + 1` after the poll interval.
    pub async fn check_status(&self, session_id: &str, attempt: u32) -> PaymentState {
        let state = match self.source.checkout_status(session_id).await {
            Ok(status) if status.is_paid() => PaymentState::Success {
                amount: status.amount,
                currency: status.currency,
            },
            Ok(status) if status.is_expired() => PaymentState::Failed {
                reason: FailureReason::Expired,
            },
            Ok(status) if attempt < self.config.max_attempts => {
                tracing::debug!(
                    session_id,
                    attempt,
                    status = %status.status,
                    payment_status = %status.payment_status,
                    "Payment not settled yet"
                );
                PaymentState::Checking
            }
            Ok(_) => PaymentState::Failed {
                reason: FailureReason::TimedOut,
            },
            Err(e) => {
                tracing::error!(session_id, attempt, error = %e, "Error checking payment status");
                PaymentState::Failed {
                    reason: FailureReason::Transport,
                }
            }
        };

        metrics::record_payment_check(&state);
        state
    }

    fn finish(&self, state: PaymentState) -> PaymentState {
        match &state {
            PaymentState::Success { amount, .. } => {
                tracing::info!(amount, "Payment confirmed")
            }
            PaymentState::Failed { reason } => {
                tracing::warn!(reason = ?reason, "Payment confirmation failed")
            }
            PaymentState::Checking => {}
        }
        metrics::record_payment_outcome(&state);
        self.state.send_replace(state.clone());
        state
    }
}
