//! Lead capture for the business website: contact form validation on the
//! client side and the submission endpoint that emails each lead.

pub mod config;
pub mod error;
pub mod form;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod notify;
pub mod submission;
pub mod validation;

pub use crate::config::AppConfig;
pub use error::{AppError, Result};
pub use form::{ContactForm, HttpTransport, InProcessTransport, MemorySlot, PreselectStore, SubmissionTransport};
pub use handlers::routes::create_routes;
pub use models::{LeadField, LeadRecord};
pub use notify::{NotificationMessage, NotificationSink, ResendSink};
pub use submission::SubmissionHandler;
pub use validation::{validate_field, validate_lead, FieldValidation};

use axum::Router;
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub submission_path: String,
    pub submissions: Arc<SubmissionHandler>,
}

impl AppState {
    pub fn new(submissions: SubmissionHandler) -> Self {
        Self {
            app_name: "Lead Capture".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            submission_path: crate::config::SubmissionConfig::default().path,
            submissions: Arc::new(submissions),
        }
    }

    /// Builds the handler from configuration around an injected sink.
    pub fn from_config(config: &AppConfig, sink: Option<Arc<dyn NotificationSink>>) -> Self {
        let handler = SubmissionHandler::new(config.mail.clone(), sink)
            .with_validation(config.submission.enforce_validation);

        Self {
            submission_path: config.submission.path.clone(),
            ..Self::new(handler)
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    create_app_with_config(state, &AppConfig::default())
}

pub fn create_app_with_config(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .merge(create_routes(&state.submission_path))
        .layer(middleware::cors::cors_layer_from_config(&config.cors))
        .layer(middleware::logging::logging_layer())
        .with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Other(e.into()))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Other(e.into()))?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
