//! Resend transactional email client

use super::{NotificationMessage, NotificationSink, ProviderError, SendOutcome, SinkError};
use crate::config::MailConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Clone)]
pub struct ResendSink {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct EmailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    html: &'a str,
    text: &'a str,
}

impl<'a> From<&'a NotificationMessage> for EmailRequest<'a> {
    fn from(message: &'a NotificationMessage) -> Self {
        Self {
            from: &message.from,
            to: &message.to,
            subject: &message.subject,
            reply_to: message.reply_to.as_deref(),
            html: &message.html,
            text: &message.text,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SentEmail {
    id: String,
}

impl ResendSink {
    pub fn new(
        api_key: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, SinkError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SinkError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/emails", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
        })
    }

    /// Builds a sink from mail settings, or `None` when no credential is configured.
    pub fn from_config(mail: &MailConfig) -> Result<Option<Self>, SinkError> {
        match mail.credential() {
            Some(key) => Self::new(
                key,
                &mail.api_base_url,
                Duration::from_secs(mail.timeout_seconds),
            )
            .map(Some),
            None => Ok(None),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl NotificationSink for ResendSink {
    async fn send(&self, message: &NotificationMessage) -> Result<SendOutcome, SinkError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&EmailRequest::from(message))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SinkError::Timeout
                } else {
                    SinkError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| SinkError::Transport(e.to_string()))?;

        debug!(status = status.as_u16(), "provider responded");

        if status.is_success() {
            let sent: SentEmail = serde_json::from_slice(&body)
                .map_err(|e| SinkError::InvalidResponse(e.to_string()))?;
            return Ok(SendOutcome::delivered(sent.id));
        }

        let error = serde_json::from_slice::<ProviderError>(&body).unwrap_or_else(|_| ProviderError {
            name: "http_error".to_string(),
            message: format!("Provider responded with HTTP {}", status.as_u16()),
            status_code: Some(status.as_u16()),
        });

        Ok(SendOutcome::rejected(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_url() {
        let sink = ResendSink::new("re_test", "https://api.resend.com/", Duration::from_secs(5)).unwrap();
        assert_eq!(sink.endpoint(), "https://api.resend.com/emails");
    }

    #[test]
    fn test_from_config_without_credential() {
        let mail = MailConfig::default();
        assert!(ResendSink::from_config(&mail).unwrap().is_none());
    }

    #[test]
    fn test_request_omits_absent_reply_to() {
        let message = NotificationMessage {
            from: "Seek Auto <onboarding@resend.dev>".to_string(),
            to: vec!["hello@seekautocars.com.au".to_string()],
            subject: "New Seek Auto Lead - Unknown".to_string(),
            reply_to: None,
            html: "<h2>New Lead Submitted</h2>".to_string(),
            text: "New Lead Submitted".to_string(),
        };

        let value = serde_json::to_value(EmailRequest::from(&message)).unwrap();
        assert!(value.get("reply_to").is_none());
        assert_eq!(value["to"][0], "hello@seekautocars.com.au");
    }
}
