//! Health check handler

use crate::{models::ApiResponse, AppState};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::warn;

/// Reports whether submissions can be delivered. A missing sink credential
/// makes the service degraded: it still answers, but every lead would fail.
pub async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    let mail_configured = state.submissions.is_configured();
    let status = if mail_configured { "healthy" } else { "degraded" };

    if !mail_configured {
        warn!("health check: notification sink is not configured");
    }

    let body = Json(ApiResponse::success(serde_json::json!({
        "status": status,
        "timestamp": chrono::Utc::now().timestamp(),
        "version": state.version,
        "mail_configured": mail_configured,
    })));

    let code = if mail_configured {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, body)
}
