//! Route table

use crate::{
    handlers::{contact::handle_contact, health::handle_health},
    models::ApiResponse,
    AppState,
};
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{any, get},
    Json, Router,
};

pub fn create_routes(submission_path: &str) -> Router<AppState> {
    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route(submission_path, any(handle_contact))
}

async fn handle_root(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::success(serde_json::json!({
        "app": state.app_name,
        "version": state.version,
        "endpoints": {
            "health": "/health",
            "contact": state.submission_path,
        }
    })))
}
