//! Admin alert handlers
//!
//! Broadcast endpoints gated by the admin API key layer, plus the
//! authenticated stats endpoint.

use application::RecipientDelivery;
use axum::Json;
use axum::extract::State;
use domain::AlertRequest;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::state::AppState;

/// Broadcast response with per-recipient results
#[derive(Debug, Serialize)]
pub struct BroadcastResponse {
    pub status: String,
    pub message: String,
    pub result: Vec<RecipientDelivery>,
}

/// Body for the emergency alert endpoint
#[derive(Debug, Deserialize)]
pub struct EmergencyBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub affected_area: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
}

/// Body for the health tip endpoint
#[derive(Debug, Deserialize)]
pub struct HealthTipBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub category: Option<String>,
}

fn broadcast_response(
    state: &AppState,
    confirmation: &str,
    result: Vec<RecipientDelivery>,
) -> Json<BroadcastResponse> {
    let delivered = result.iter().filter(|d| d.outcome.success).count() as u64;
    state.stats.record_alerts(delivered);
    Json(BroadcastResponse {
        status: "success".to_string(),
        message: confirmation.to_string(),
        result,
    })
}

/// Send a broadcast alert to all users
#[instrument(skip(state, request), fields(alert_type = ?request.alert_type))]
pub async fn send_broadcast(
    State(state): State<AppState>,
    Json(request): Json<AlertRequest>,
) -> Result<Json<BroadcastResponse>, ApiError> {
    let dispatcher = state
        .dispatcher
        .as_ref()
        .ok_or_else(|| ApiError::ServiceUnavailable("Alert service not available".to_string()))?;

    info!(priority = ?request.priority, "Broadcasting alert");
    let result = dispatcher.broadcast(&request).await?;
    Ok(broadcast_response(
        &state,
        "Broadcast alert sent successfully",
        result,
    ))
}

/// Send an emergency alert
#[instrument(skip(state, body))]
pub async fn send_emergency(
    State(state): State<AppState>,
    Json(body): Json<EmergencyBody>,
) -> Result<Json<BroadcastResponse>, ApiError> {
    let dispatcher = state
        .dispatcher
        .as_ref()
        .ok_or_else(|| ApiError::ServiceUnavailable("Alert service not available".to_string()))?;

    info!("Sending emergency alert");
    let result = dispatcher
        .send_emergency_alert(body.message, body.affected_area, body.instructions)
        .await?;
    Ok(broadcast_response(
        &state,
        "Emergency alert sent successfully",
        result,
    ))
}

/// Send a health tip
#[instrument(skip(state, body))]
pub async fn send_health_tip(
    State(state): State<AppState>,
    Json(body): Json<HealthTipBody>,
) -> Result<Json<BroadcastResponse>, ApiError> {
    let dispatcher = state
        .dispatcher
        .as_ref()
        .ok_or_else(|| ApiError::ServiceUnavailable("Alert service not available".to_string()))?;

    info!("Sending health tip");
    let result = dispatcher
        .send_health_tip(body.message, body.category)
        .await?;
    Ok(broadcast_response(
        &state,
        "Health tip sent successfully",
        result,
    ))
}

/// Rolling counters since process start
pub async fn stats(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "success",
        "stats": {
            "messages_processed": state.stats.messages_processed(),
            "replies_sent": state.stats.replies_sent(),
            "alerts_sent": state.stats.alerts_sent(),
        }
    }))
}
