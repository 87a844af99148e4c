//! Heart Health Chat
//!
//! A single-page chat with "Dr. Siddiqui", a Gemini-backed heart health
//! assistant, plus an appointment form that appears once the visitor asks
//! for an appointment.

mod api;
mod booking;
mod chat;
mod config;
mod llm;
mod session;
mod system_prompt;

use api::{create_router, AppState};
use chat::ConversationController;
use config::{AppConfig, ConfigError};
use llm::{GeminiService, LlmService, LoggingService};
use session::SessionManager;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine
    let dotenv = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "heart_chat=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    if let Ok(path) = dotenv {
        tracing::info!(path = %path.display(), "Loaded environment file");
    }

    let config = AppConfig::from_env()?;

    let chat = build_controller(&config);
    match &chat {
        Ok(controller) => {
            tracing::info!(model = %controller.model_id(), "Chat enabled");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Chat disabled; serving the page without it");
        }
    }

    let state = AppState::new(SessionManager::new(config.session_idle_ttl), chat);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new().gzip(true).br(true);

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(compression);

    // Start server
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Heart health chat listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Gemini client wrapped for logging, or the configuration problem that
/// keeps chat switched off
fn build_controller(config: &AppConfig) -> Result<ConversationController, ConfigError> {
    let api_key = config.api_key()?;

    let gemini = GeminiService::new(
        api_key.to_string(),
        &config.model,
        config.api_base.as_deref(),
    )
    .map_err(|e| ConfigError::Client(e.message))?;

    let llm: Arc<dyn LlmService> = Arc::new(LoggingService::new(Arc::new(gemini)));
    Ok(ConversationController::new(llm))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
