//! Outbound lead notifications.
//!
//! The sink is an opaque collaborator: it either accepts a message, answers
//! with an embedded provider error, or fails at the transport level.

pub mod resend;

pub use resend::ResendSink;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    pub html: String,
    pub text: String,
}

/// Error detail reported by the provider inside an otherwise normal reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderError {
    pub name: String,
    pub message: String,
    #[serde(rename = "statusCode", default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendOutcome {
    pub id: Option<String>,
    pub error: Option<ProviderError>,
}

impl SendOutcome {
    pub fn delivered(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            error: None,
        }
    }

    pub fn rejected(error: ProviderError) -> Self {
        Self {
            id: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request to provider timed out")]
    Timeout,

    #[error("Unreadable provider response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, message: &NotificationMessage) -> Result<SendOutcome, SinkError>;
}
