#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::response::Response;
use http_body_util::BodyExt;
use lead_core::notify::{NotificationMessage, NotificationSink, ProviderError, SendOutcome, SinkError};
use parking_lot::Mutex;
use std::sync::Arc;

pub enum SinkReply {
    Deliver,
    Reject,
    Fail,
}

pub struct StubSink {
    reply: SinkReply,
    pub sent: Mutex<Vec<NotificationMessage>>,
}

impl StubSink {
    pub fn new(reply: SinkReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }

    pub fn last(&self) -> Option<NotificationMessage> {
        self.sent.lock().last().cloned()
    }
}

#[async_trait]
impl NotificationSink for StubSink {
    async fn send(&self, message: &NotificationMessage) -> Result<SendOutcome, SinkError> {
        self.sent.lock().push(message.clone());
        match self.reply {
            SinkReply::Deliver => Ok(SendOutcome::delivered("4ef9a417-02e9-4d39-ad75-9611e0fcc33c")),
            SinkReply::Reject => Ok(SendOutcome::rejected(ProviderError {
                name: "validation_error".to_string(),
                message: "You can only send testing emails to your own email address".to_string(),
                status_code: Some(403),
            })),
            SinkReply::Fail => Err(SinkError::Transport("connection refused".to_string())),
        }
    }
}

pub fn as_sink(sink: &Arc<StubSink>) -> Option<Arc<dyn NotificationSink>> {
    Some(sink.clone() as Arc<dyn NotificationSink>)
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
