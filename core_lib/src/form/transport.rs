//! Delivery of a validated form to the submission endpoint

use crate::submission::{FieldMap, InboundBody, SubmissionHandler};
use async_trait::async_trait;
use axum::http::Method;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Flat key to string mapping of every form field.
pub type FormPayload = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq)]
pub struct TransportReply {
    pub status: u16,
    pub body: Value,
}

impl TransportReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Human-readable error carried by a failure reply.
    pub fn error_message(&self) -> String {
        match &self.body["error"] {
            Value::String(message) => message.clone(),
            Value::Object(detail) => detail
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Email failed to send")
                .to_string(),
            _ => format!("Submission failed with status {}", self.status),
        }
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    async fn submit(&self, payload: &FormPayload) -> Result<TransportReply, TransportError>;
}

/// Posts the form as JSON to a remote submission endpoint.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl SubmissionTransport for HttpTransport {
    async fn submit(&self, payload: &FormPayload) -> Result<TransportReply, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))?;

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|e| TransportError::InvalidResponse(e.to_string()))?
        };

        Ok(TransportReply { status, body })
    }
}

/// Hands the form straight to a local handler as a structured record.
#[derive(Clone)]
pub struct InProcessTransport {
    handler: Arc<SubmissionHandler>,
}

impl InProcessTransport {
    pub fn new(handler: Arc<SubmissionHandler>) -> Self {
        Self { handler }
    }
}

#[async_trait]
impl SubmissionTransport for InProcessTransport {
    async fn submit(&self, payload: &FormPayload) -> Result<TransportReply, TransportError> {
        let fields: FieldMap = payload.clone().into_iter().collect();

        let reply = match self.handler.handle(&Method::POST, InboundBody::Record(fields)).await {
            Ok(_) => TransportReply {
                status: 200,
                body: json!({ "success": true }),
            },
            Err(e) => TransportReply {
                status: e.status_code().as_u16(),
                body: e.body(),
            },
        };

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_string_body() {
        let reply = TransportReply {
            status: 500,
            body: json!({ "error": "Email failed to send" }),
        };
        assert!(!reply.is_success());
        assert_eq!(reply.error_message(), "Email failed to send");
    }

    #[test]
    fn test_error_message_from_provider_detail() {
        let reply = TransportReply {
            status: 502,
            body: json!({ "error": { "name": "validation_error", "message": "Domain not verified" } }),
        };
        assert_eq!(reply.error_message(), "Domain not verified");
    }

    #[test]
    fn test_error_message_without_body() {
        let reply = TransportReply {
            status: 504,
            body: Value::Null,
        };
        assert_eq!(reply.error_message(), "Submission failed with status 504");
    }
}
