use ai_llm_service::AiLlmError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use conversation_store::StoreError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::core::app_state::ConfigError;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("bad request: {0}")]
    BadRequest(String),

    // --- Collaborators ---
    #[error("completion service error: {0}")]
    Completion(#[from] AiLlmError),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl AppError {
    /// Classifies an LLM client failure raised while booting: bad or missing
    /// settings are configuration errors, anything else stays a completion error.
    pub fn from_llm_startup(err: AiLlmError) -> Self {
        match err {
            AiLlmError::Config(cfg) => AppError::Config(ConfigError::Llm(cfg)),
            other => AppError::Completion(other),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Completion(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_)
            | AppError::Bind(_)
            | AppError::Server(_)
            | AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Completion(_) => "UPSTREAM_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Text shown to the caller. Upstream and storage details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            AppError::Completion(_) => "the completion service failed to answer".into(),
            AppError::Storage(_) => "the conversation store is unavailable".into(),
            other => other.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(%status, code = self.error_code(), error = %self, "request failed");
        }
        let body = ErrorBody {
            error: self.error_code(),
            message: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}
