//! Health check handlers

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
}

/// Liveness check - is the server running?
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "careline".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Alert subsystem readiness
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminHealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: String,
    pub services: AdminServiceStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminServiceStatus {
    pub alert_dispatcher: bool,
    pub message_pipeline: bool,
}

/// Alert subsystem health, served without authentication
pub async fn admin_health(State(state): State<AppState>) -> Json<AdminHealthResponse> {
    Json(AdminHealthResponse {
        status: "healthy".to_string(),
        service: "admin_alerts".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        services: AdminServiceStatus {
            alert_dispatcher: state.dispatcher.is_some(),
            message_pipeline: true,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_response_serialization() {
        let resp = HealthResponse {
            status: "healthy".to_string(),
            service: "careline".to_string(),
            version: "0.3.1".to_string(),
            timestamp: "2026-01-01T00:00:00Z".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("careline"));
    }

    #[test]
    fn admin_health_response_roundtrip() {
        let json = r#"{
            "status": "healthy",
            "service": "admin_alerts",
            "timestamp": "2026-01-01T00:00:00Z",
            "services": {"alert_dispatcher": true, "message_pipeline": true}
        }"#;
        let resp: AdminHealthResponse = serde_json::from_str(json).unwrap();
        assert!(resp.services.alert_dispatcher);
    }
}
