use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::alerts::{AlertError, AlertRequest, AlertSource, AnimationPhase};
use crate::http::server::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct TriggerResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SystemStatus {
    pub version: String,
    pub status: String,
    pub display_running: bool,
    pub phase: AnimationPhase,
    pub alerts_presented: u64,
    pub last_seen_tip: Option<String>,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    let frame = state.display.current();
    let display_running = !state.display.is_closed();

    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: if display_running { "operational" } else { "degraded" }.to_string(),
        display_running,
        phase: frame.phase,
        alerts_presented: frame.seq,
        last_seen_tip: state
            .last_seen
            .borrow()
            .as_ref()
            .map(|id| id.to_string()),
    })
}

pub async fn trigger_test_alert(
    State(state): State<AppState>,
) -> Result<Json<TriggerResponse>, AlertError> {
    state.display.trigger_test_alert().await?;
    tracing::info!("Test alert triggered");

    Ok(Json(TriggerResponse {
        status: "triggered".to_string(),
        message: "Test alert triggered!".to_string(),
    }))
}

pub async fn present_alert(
    State(state): State<AppState>,
    Json(request): Json<AlertRequest>,
) -> Result<(StatusCode, Json<TriggerResponse>), AlertError> {
    state.display.present(request, AlertSource::Operator).await?;
    tracing::info!("Custom alert triggered");

    Ok((
        StatusCode::ACCEPTED,
        Json(TriggerResponse {
            status: "triggered".to_string(),
            message: "Custom alert triggered!".to_string(),
        }),
    ))
}
