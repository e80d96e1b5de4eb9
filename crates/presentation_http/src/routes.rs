//! Route definitions

use axum::Router;
use axum::routing::{get, post};

use crate::middleware::AdminKeyLayer;
use crate::{handlers, state::AppState};

/// Create the main router with all routes.
///
/// Protected admin routes sit behind the API key layer; the webhook, the
/// liveness check, and the admin health probe stay open.
pub fn create_router(state: AppState) -> Router {
    let admin_key = state
        .config
        .security
        .admin_api_key_str()
        .map(str::to_string);

    let protected = Router::new()
        .route("/admin/broadcast", post(handlers::admin::send_broadcast))
        .route("/admin/emergency", post(handlers::admin::send_emergency))
        .route("/admin/health-tip", post(handlers::admin::send_health_tip))
        .route("/admin/stats", get(handlers::admin::stats))
        .route_layer(AdminKeyLayer::new(admin_key));

    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/admin/health", get(handlers::health::admin_health))
        // WhatsApp webhook
        .route(
            "/webhook",
            get(handlers::webhook::verify_webhook).post(handlers::webhook::receive_message),
        )
        // Protected admin API
        .merge(protected)
        // Attach state
        .with_state(state)
}
