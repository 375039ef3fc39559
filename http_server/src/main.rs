//! Main entry point for the lead capture server binary

use anyhow::Result;
use lead_core::{create_app_with_config, run_server, AppConfig, AppState, NotificationSink, ResendSink};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    info!("Configuration loaded successfully");
    info!("Server will bind to: {}", config.bind_address());
    info!("Mail settings: {:?}", config.mail);

    let addr: SocketAddr = config.bind_address().parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))?;

    let sink: Option<Arc<dyn NotificationSink>> = match ResendSink::from_config(&config.mail) {
        Ok(Some(sink)) => {
            info!("Notification sink ready: {}", sink.endpoint());
            Some(Arc::new(sink))
        }
        Ok(None) => {
            error!("No mail credential configured (set RESEND_API_KEY); submissions will be refused");
            None
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to build notification sink: {}", e)),
    };

    let state = AppState::from_config(&config, sink);
    info!("App: {} v{}", state.app_name, state.version);
    info!("Accepting submissions on {}", state.submission_path);

    let app = create_app_with_config(state, &config);

    run_server(app, addr).await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            let default_level = if cfg!(debug_assertions) {
                "debug"
            } else {
                "info"
            };

            format!(
                "{}={},lead_core={},tower_http=debug",
                env!("CARGO_CRATE_NAME").replace('-', "_"),
                default_level,
                default_level
            ).into()
        });

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let is_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    if is_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.pretty())
            .init();
    }
}
