//! Chat-completion client shared by the backend.
//!
//! The crate exposes a provider-agnostic [`ChatCompletion`] trait plus one
//! concrete implementation, [`OpenAiService`], that talks to any
//! OpenAI-compatible `/v1/chat/completions` endpoint (Groq, OpenAI, ...).
//!
//! Construct the client once at startup, wrap it in `Arc`, and share it.

pub mod chat_message;
pub mod completion;
pub mod config;
pub mod error_handler;
pub mod services;

pub use chat_message::{ChatMessage, MessageRole};
pub use completion::{ChatCompletion, Completion, TokenUsage};
pub use config::{default_config::config_groq_chat, llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
pub use error_handler::{AiLlmError, ConfigError, ProviderError, ProviderErrorKind};
pub use services::open_ai_service::OpenAiService;
