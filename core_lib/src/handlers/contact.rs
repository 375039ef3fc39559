//! Lead submission endpoint

use crate::{error::Result, models::ApiResponse, submission::InboundBody, AppState};
use axum::{body::Bytes, extract::State, http::Method, response::IntoResponse, Json};

/// Mounted for every method so that anything other than POST gets the
/// handler's own 405 body.
pub async fn handle_contact(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Result<impl IntoResponse> {
    state
        .submissions
        .handle(&method, InboundBody::from_bytes(&body))
        .await?;

    Ok(Json(ApiResponse::ok()))
}
