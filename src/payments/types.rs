//! Payment confirmation states and their rendered views.

use serde::{Deserialize, Serialize};

/// Why a confirmation ended in `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// No session ID came back from checkout.
    NoSession,
    /// The checkout session expired before payment.
    Expired,
    /// The attempt budget ran out while the session was still open.
    TimedOut,
    /// The status query itself failed.
    Transport,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            FailureReason::NoSession => "No payment session found",
            FailureReason::Expired => "Payment session expired",
            FailureReason::TimedOut => {
                "Payment verification timed out. Please check your email for confirmation."
            }
            FailureReason::Transport => "Failed to verify payment status",
        };
        f.write_str(text)
    }
}

/// State of a payment confirmation.
///
/// # State Transitions
/// ```text
/// Checking ──paid──────────────▶ Success
/// Checking ──expired / budget / error──▶ Failed
/// ```
/// `Success` and `Failed` are terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PaymentState {
    Checking,
    Success {
        amount: f64,
        currency: Option<String>,
    },
    Failed {
        reason: FailureReason,
    },
}

impl PaymentState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PaymentState::Checking)
    }

    /// Page content for this state.
    pub fn view(&self) -> PaymentView {
        match self {
            PaymentState::Checking => PaymentView {
                status: "checking".into(),
                title: "Verifying Payment...".into(),
                message: "Please wait while we confirm your tip.".into(),
            },
            PaymentState::Success { amount, .. } => PaymentView {
                status: "success".into(),
                title: "Thank You!".into(),
                message: format!(
                    "Your tip of ${:.2} has been successfully processed.",
                    amount
                ),
            },
            PaymentState::Failed { reason } => PaymentView {
                status: "failed".into(),
                title: "Payment Failed".into(),
                message: reason.to_string(),
            },
        }
    }
}

/// Rendered confirmation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentView {
    pub status: String,
    pub title: String,
    pub message: String,
}
