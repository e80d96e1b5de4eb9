//! WhatsApp webhook handlers
//!
//! Handles the Meta subscription handshake (GET) and inbound message
//! deliveries (POST). Deliveries are always acknowledged with 200 so the
//! platform does not retry payloads we cannot act on; only a failed
//! signature check is rejected outright.

use application::PipelineReport;
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use integration_whatsapp::verify_signature;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, instrument, warn};

use crate::state::AppState;

/// Query parameters for webhook verification
#[derive(Debug, Deserialize)]
pub struct WebhookVerifyQuery {
    #[serde(rename = "hub.mode")]
    pub hub_mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub hub_verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub hub_challenge: Option<String>,
}

/// WhatsApp webhook verification (GET)
///
/// Meta sends a GET request to verify webhook ownership during setup. We
/// must check the token and echo the challenge back as plain text.
#[instrument(skip(state, query))]
pub async fn verify_webhook(
    State(state): State<AppState>,
    Query(query): Query<WebhookVerifyQuery>,
) -> impl IntoResponse {
    let Some(verify_token) = state
        .config
        .whatsapp
        .verify_token
        .as_deref()
        .filter(|t| !t.is_empty())
    else {
        warn!("Webhook verification attempted but verify_token not configured");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            "WhatsApp integration not configured",
        )
            .into_response();
    };

    info!(mode = ?query.hub_mode, "Webhook verification request");

    let mode_ok = query.hub_mode.as_deref() == Some("subscribe");
    let token_ok = query.hub_verify_token.as_deref() == Some(verify_token);

    if mode_ok && token_ok {
        let challenge = query.hub_challenge.unwrap_or_default();
        info!("Webhook verified successfully");
        (StatusCode::OK, challenge).into_response()
    } else {
        warn!("Webhook verification failed: token mismatch");
        (StatusCode::FORBIDDEN, "Verification failed").into_response()
    }
}

/// WhatsApp webhook message handler (POST)
///
/// Parses the delivery and runs the reply pipeline. Responds 200 for
/// anything except a failed signature check, carrying the outcome in the
/// body.
#[instrument(skip(state, headers, body))]
pub async fn receive_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    if state.config.whatsapp.signature_required {
        let Some(app_secret) = state.config.whatsapp.app_secret_str() else {
            warn!("Webhook received but app_secret not configured");
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({"error": "WhatsApp app_secret not configured"})),
            )
                .into_response();
        };

        let signature = headers
            .get("x-hub-signature-256")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !verify_signature(&body, signature, app_secret) {
            warn!("Webhook signature verification failed");
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": "Invalid signature"})),
            )
                .into_response();
        }
    }

    let event: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(err) => {
            warn!(error = %err, "Webhook body is not valid JSON");
            return (
                StatusCode::OK,
                Json(json!({"status": "error", "message": "invalid JSON body"})),
            )
                .into_response();
        },
    };

    let entry_count = event
        .get("entry")
        .and_then(|e| e.as_array())
        .map_or(0, Vec::len);
    info!(entries = entry_count, "Received webhook");

    let report = state.pipeline.process_event(&event).await;

    match &report {
        PipelineReport::Processed { .. } => {
            state.stats.record_message(report.sent());
            (
                StatusCode::OK,
                Json(json!({"status": "success", "result": report})),
            )
                .into_response()
        },
        PipelineReport::NoMessage => {
            debug!("No user message in delivery");
            (StatusCode::OK, Json(json!({"status": "no_message"}))).into_response()
        },
    }
}
