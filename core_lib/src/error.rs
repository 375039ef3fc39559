//! Application error types and handling

use crate::notify::ProviderError;
use crate::validation::ValidationReport;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Dispatch error: {0}")]
    Dispatch(String),

    #[error("Delivery error: {}: {}", .0.name, .0.message)]
    Delivery(ProviderError),

    #[error("Validation failed")]
    Validation(ValidationReport),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Dispatch(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Delivery(_) => StatusCode::BAD_GATEWAY,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body sent to the caller. Internal detail stays in the logs.
    pub fn body(&self) -> Value {
        match self {
            AppError::MethodNotAllowed => json!({ "error": "Method not allowed" }),
            AppError::Configuration(_) => json!({ "error": "Email service is not configured" }),
            AppError::Dispatch(_) => json!({ "error": "Email failed to send" }),
            AppError::Delivery(detail) => json!({ "error": detail }),
            AppError::Validation(report) => json!({
                "error": "Validation failed",
                "fields": report.errors,
            }),
            AppError::Other(_) => json!({ "error": "Internal server error" }),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Other(err) = &self {
            tracing::error!("Unexpected error: {:?}", err);
        }

        (self.status_code(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_statuses_are_distinct() {
        let statuses = [
            AppError::MethodNotAllowed.status_code(),
            AppError::Configuration("missing key".to_string()).status_code(),
            AppError::Dispatch("connection refused".to_string()).status_code(),
            AppError::Delivery(ProviderError {
                name: "validation_error".to_string(),
                message: "Invalid `to` field".to_string(),
                status_code: Some(422),
            })
            .status_code(),
        ];

        for (i, a) in statuses.iter().enumerate() {
            assert!(!a.is_success());
            for b in statuses.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_configuration_body_hides_detail() {
        let err = AppError::Configuration("RESEND_API_KEY is not set".to_string());
        let body = err.body().to_string();
        assert!(!body.contains("RESEND_API_KEY"));
    }

    #[test]
    fn test_delivery_body_carries_provider_detail() {
        let err = AppError::Delivery(ProviderError {
            name: "validation_error".to_string(),
            message: "The domain is not verified".to_string(),
            status_code: Some(403),
        });

        let body = err.body();
        assert_eq!(body["error"]["name"], "validation_error");
        assert_eq!(body["error"]["message"], "The domain is not verified");
    }
}
