use std::sync::Arc;

use ai_llm_service::ChatCompletion;
use axum::http::HeaderValue;
use conversation_store::ConversationStore;
use thiserror::Error;

use crate::core::api_config::ApiConfig;

/// Shared state for all HTTP handlers.
///
/// Built once at startup; the store and the completion client own the
/// process-wide connection pools.
#[derive(Clone)]
pub struct AppState {
    /// Conversation log (MongoDB in production).
    pub store: Arc<dyn ConversationStore>,
    /// Remote text-generation client.
    pub llm: Arc<dyn ChatCompletion>,
    /// System instruction placed first in every prompt.
    pub system_prompt: String,
    /// Optional cap on replayed turns.
    pub history_limit: Option<usize>,
    /// Browser origins allowed by CORS.
    pub allowed_origins: Vec<HeaderValue>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ConversationStore>,
        llm: Arc<dyn ChatCompletion>,
        cfg: &ApiConfig,
    ) -> Self {
        Self {
            store,
            llm,
            system_prompt: cfg.system_prompt.clone(),
            history_limit: cfg.history_limit,
            allowed_origins: cfg.allowed_origins.clone(),
        }
    }
}

/// Startup configuration problems of the HTTP layer.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("invalid number in {var}: {reason}")]
    InvalidNumber {
        var: &'static str,
        reason: &'static str,
    },

    #[error("invalid CORS origin: {0}")]
    InvalidOrigin(String),

    #[error(transparent)]
    Llm(#[from] ai_llm_service::ConfigError),
}
