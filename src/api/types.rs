//! Backend wire types and error definitions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status of an external checkout session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutStatus {
    #[serde(default)]
    pub session_id: Option<String>,
    /// Session lifecycle (`open`, `complete`, `expired`, ...).
    pub status: String,
    /// Payment state (`paid`, `unpaid`, ...).
    pub payment_status: String,
    /// Amount in major currency units.
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
}

impl CheckoutStatus {
    pub fn is_paid(&self) -> bool {
        self.payment_status == "paid"
    }

    pub fn is_expired(&self) -> bool {
        self.status == "expired"
    }
}

/// A confirmed tip as reported by the recent-tips feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipEvent {
    /// Kept verbatim; it is half of the tip identity.
    pub timestamp: String,
    pub amount: f64,
    #[serde(default)]
    pub tipper_name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Public creator profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorProfile {
    pub name: String,
    pub bio: String,
    pub avatar_url: String,
    #[serde(default)]
    pub social_links: HashMap<String, String>,
}

/// Body of `POST /api/checkout/session`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub amount: f64,
    pub message: Option<String>,
    pub tipper_name: Option<String>,
    pub origin_url: String,
}

/// Redirect target for a freshly created checkout session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub url: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Errors talking to the REST backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection failure, timeout, or other transport problem.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status.
    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not match the expected shape.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Result type for backend calls.
pub type ApiResult<T> = Result<T, ApiError>;
