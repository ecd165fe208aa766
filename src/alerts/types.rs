//! Alert requests, tip identities, and overlay frames.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::api::{ApiError, TipEvent};

/// Kind of alert. Tips are the only kind the overlay knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    #[default]
    Tip,
}

impl AlertKind {
    pub fn title(&self) -> &'static str {
        match self {
            AlertKind::Tip => "NEW TIP",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            AlertKind::Tip => "$",
        }
    }

    /// Style class the overlay page applies to the alert box.
    pub fn css_class(&self) -> &'static str {
        match self {
            AlertKind::Tip => "alert-tip",
        }
    }
}

/// A request to show one alert. Every field is optional on the wire.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertRequest {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub username: Option<String>,
    pub amount: Option<f64>,
    pub message: Option<String>,
}

impl AlertRequest {
    /// The canned alert behind "trigger test alert".
    pub fn test_alert() -> Self {
        Self {
            kind: AlertKind::Tip,
            username: Some("TestUser".into()),
            amount: Some(25.00),
            message: Some("This is a test alert!".into()),
        }
    }

    /// Build an alert for a tip seen on the feed.
    pub fn from_tip(tip: &TipEvent, anonymous_name: &str) -> Self {
        let username = tip
            .tipper_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(anonymous_name);

        Self {
            kind: AlertKind::Tip,
            username: Some(username.to_string()),
            amount: Some(tip.amount),
            message: tip.message.clone(),
        }
    }

    /// Text shown in the alert body.
    ///
    /// An empty message counts as no message.
    pub fn render_text(&self, default_username: &str) -> String {
        let username = self.username.as_deref().unwrap_or(default_username);
        match self.message.as_deref().filter(|m| !m.is_empty()) {
            Some(message) => format!("{}: \"{}\"", username, message),
            None => format!("{} sent ${}", username, self.amount.unwrap_or(0.0)),
        }
    }
}

/// Heuristic "have we shown this tip yet" key: timestamp and amount.
///
/// Two tips with the same amount and timestamp collapse into one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TipIdentity(String);

impl TipIdentity {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&TipEvent> for TipIdentity {
    fn from(tip: &TipEvent) -> Self {
        Self(format!("{}_{}", tip.timestamp, tip.amount))
    }
}

impl std::fmt::Display for TipIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Animation phase of the overlay alert.
///
/// # State Transitions
/// ```text
/// Idle ─present─▶ Entering ─enter─▶ Showing ─hold─▶ Exiting ─exit─▶ Hidden
///                    ▲                                                  │
///                    └──────────── present (from any phase) ────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationPhase {
    Idle,
    Entering,
    Showing,
    Exiting,
    Hidden,
}

/// What the overlay shows right now.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertFrame {
    /// Number of alerts presented so far; 0 before the first.
    pub seq: u64,
    pub alert_id: Option<Uuid>,
    pub phase: AnimationPhase,
    pub kind: AlertKind,
    pub class: String,
    pub title: String,
    pub icon: String,
    pub message: String,
    pub detail: String,
}

impl AlertFrame {
    /// Frame shown before any alert arrives.
    pub fn waiting(detail: &str) -> Self {
        let kind = AlertKind::Tip;
        Self {
            seq: 0,
            alert_id: None,
            phase: AnimationPhase::Idle,
            kind,
            class: kind.css_class().to_string(),
            title: kind.title().to_string(),
            icon: kind.icon().to_string(),
            message: "Waiting for tips...".to_string(),
            detail: detail.to_string(),
        }
    }
}

/// Who asked for an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSource {
    /// The recent-tips poller.
    Feed,
    /// A direct trigger from an operator.
    Operator,
}

impl AlertSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSource::Feed => "feed",
            AlertSource::Operator => "operator",
        }
    }
}

/// Errors in the alert pipeline.
#[derive(Debug, Error)]
pub enum AlertError {
    /// The tip feed could not be read. Transient; the next poll retries.
    #[error("tip feed unavailable: {0}")]
    FeedUnavailable(#[source] ApiError),

    /// The display task has stopped.
    #[error("alert display is not running")]
    DisplayClosed,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tip(name: Option<&str>, message: Option<&str>) -> TipEvent {
        TipEvent {
            timestamp: "2025-01-01T10:00:00Z".into(),
            amount: 5.0,
            tipper_name: name.map(str::to_string),
            message: message.map(str::to_string),
        }
    }

    #[test]
    fn test_render_with_message() {
        assert_eq!(
            AlertRequest::test_alert().render_text("EdgeRunner"),
            "TestUser: \"This is a test alert!\""
        );
    }

    #[test]
    fn test_render_without_message() {
        let request = AlertRequest {
            username: Some("EdgeRunner".into()),
            amount: Some(12.0),
            ..Default::default()
        };
        assert_eq!(request.render_text("EdgeRunner"), "EdgeRunner sent $12");
    }

    #[test]
    fn test_render_defaults() {
        assert_eq!(AlertRequest::default().render_text("EdgeRunner"), "EdgeRunner sent $0");

        let request = AlertRequest {
            amount: Some(12.5),
            message: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(request.render_text("EdgeRunner"), "EdgeRunner sent $12.5");
    }

    #[test]
    fn test_request_from_partial_json() {
        let request: AlertRequest = serde_json::from_str(r#"{"username":"Vi","amount":3}"#).unwrap();
        assert_eq!(request.kind, AlertKind::Tip);
        assert_eq!(request.message, None);
        assert_eq!(request.render_text("EdgeRunner"), "Vi sent $3");

        let request: AlertRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, AlertRequest::default());
    }

    #[test]
    fn test_from_tip_uses_anonymous_name() {
        let request = AlertRequest::from_tip(&tip(None, Some("gg")), "Anonymous");
        assert_eq!(request.render_text("EdgeRunner"), "Anonymous: \"gg\"");

        let request = AlertRequest::from_tip(&tip(Some(""), None), "Anonymous");
        assert_eq!(request.render_text("EdgeRunner"), "Anonymous sent $5");

        let request = AlertRequest::from_tip(&tip(Some("Judy"), None), "Anonymous");
        assert_eq!(request.username.as_deref(), Some("Judy"));
    }

    #[test]
    fn test_tip_identity() {
        let a = TipIdentity::from(&tip(Some("a"), None));
        let b = TipIdentity::from(&tip(Some("b"), Some("different message")));
        assert_eq!(a.as_str(), "2025-01-01T10:00:00Z_5");
        // Same timestamp and amount collide regardless of the rest.
        assert_eq!(a, b);

        let mut other = tip(None, None);
        other.amount = 5.5;
        assert_ne!(a, TipIdentity::from(&other));
    }

    #[test]
    fn test_waiting_frame() {
        let frame = AlertFrame::waiting("Night City // Live Data Feed");
        assert_eq!(frame.phase, AnimationPhase::Idle);
        assert_eq!(frame.message, "Waiting for tips...");
        assert_eq!(frame.class, "alert-tip");
    }
}
