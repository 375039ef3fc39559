use super::body::{normalize_body, InboundBody};
use super::message::build_message;
use crate::config::MailConfig;
use crate::error::{AppError, Result};
use crate::models::LeadRecord;
use crate::notify::NotificationSink;
use crate::validation::validate_lead;
use axum::http::Method;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Stages one submission passes through before a response is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStage {
    Received,
    MethodChecked,
    ConfigChecked,
    BodyParsed,
    MessageBuilt,
    Dispatched,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub submission_id: Uuid,
    pub message_id: Option<String>,
}

/// Accepts lead submissions and forwards them to a notification sink.
///
/// The sink is injected; a handler built without one answers every
/// submission with a configuration error and never attempts delivery.
#[derive(Clone)]
pub struct SubmissionHandler {
    mail: MailConfig,
    sink: Option<Arc<dyn NotificationSink>>,
    enforce_validation: bool,
}

impl SubmissionHandler {
    pub fn new(mail: MailConfig, sink: Option<Arc<dyn NotificationSink>>) -> Self {
        Self {
            mail,
            sink,
            enforce_validation: false,
        }
    }

    pub fn with_validation(mut self, enforce: bool) -> Self {
        self.enforce_validation = enforce;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.sink.is_some()
    }

    pub async fn handle(&self, method: &Method, body: InboundBody) -> Result<Receipt> {
        let submission_id = Uuid::new_v4();
        let span = info_span!("submission", %submission_id, %method);

        self.process(submission_id, method, body).instrument(span).await
    }

    async fn process(&self, submission_id: Uuid, method: &Method, body: InboundBody) -> Result<Receipt> {
        debug!(stage = ?SubmissionStage::Received);

        if *method != Method::POST {
            return Err(AppError::MethodNotAllowed);
        }
        debug!(stage = ?SubmissionStage::MethodChecked);

        let Some(sink) = self.sink.as_ref() else {
            error!("no credential configured for the notification sink");
            return Err(AppError::Configuration(
                "notification sink credential is not configured".to_string(),
            ));
        };
        debug!(stage = ?SubmissionStage::ConfigChecked);

        let normalized = normalize_body(&body);
        let lead = LeadRecord::from_fields(&normalized.fields);
        debug!(stage = ?SubmissionStage::BodyParsed, source = ?normalized.source);

        if self.enforce_validation {
            let report = validate_lead(&lead);
            if !report.is_valid {
                let fields: Vec<&String> = report.errors.keys().collect();
                info!(?fields, "lead rejected by validation");
                return Err(AppError::Validation(report));
            }
        }

        let message = build_message(&lead, &self.mail);
        debug!(stage = ?SubmissionStage::MessageBuilt, subject = %message.subject);

        let outcome = match sink.send(&message).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, "notification sink failed");
                return Err(AppError::Dispatch(e.to_string()));
            }
        };
        debug!(stage = ?SubmissionStage::Dispatched);

        if let Some(detail) = outcome.error {
            warn!(provider_error = %detail.name, "provider rejected notification: {}", detail.message);
            return Err(AppError::Delivery(detail));
        }

        info!(message_id = ?outcome.id, "lead notification sent");

        Ok(Receipt {
            submission_id,
            message_id: outcome.id,
        })
    }
}
