//! HTTP surface of the chat backend.
//!
//! `GET /` answers a static welcome payload; `POST /chat` replays the user's
//! stored conversation to the completion service and appends the new exchange.

pub mod chat;
pub mod core;
pub mod error_handler;
mod middleware_layer;
mod routes;

use std::sync::Arc;

use ai_llm_service::{OpenAiService, config_groq_chat};
use axum::{
    Router,
    routing::{get, post},
};
use conversation_store::MongoConversationStore;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::{
    core::{api_config::ApiConfig, app_state::AppState},
    error_handler::AppError,
    middleware_layer::cors::cors_layer,
    routes::{chat::chat_route::chat, home_route::home},
};

pub use routes::{
    chat::chat_request::{ChatRequest, ChatResponse},
    home_route::WELCOME_MESSAGE,
};

/// Builds the application router over an already-initialized state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/chat", post(chat))
        .layer(cors_layer(&state.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Reads configuration, connects the shared clients and serves until Ctrl+C.
///
/// # Errors
/// Fails before serving when required configuration is missing or invalid,
/// or when the listener cannot be bound.
pub async fn start() -> Result<(), AppError> {
    let api_cfg = ApiConfig::from_env()?;
    let llm_cfg = config_groq_chat().map_err(AppError::from_llm_startup)?;

    let llm = Arc::new(OpenAiService::new(llm_cfg)?);
    let store = Arc::new(MongoConversationStore::connect(&api_cfg.store).await?);
    if let Err(err) = store.ensure_indexes().await {
        warn!(error = %err, "continuing without the history index");
    }

    let state = Arc::new(AppState::new(store, llm, &api_cfg));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&api_cfg.address)
        .await
        .map_err(AppError::Bind)?;
    info!(address = %api_cfg.address, "listening");

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("server stopped");
    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
