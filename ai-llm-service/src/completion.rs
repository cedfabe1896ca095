//! Provider-agnostic completion contract.

use async_trait::async_trait;
use serde::Serialize;

use crate::{chat_message::ChatMessage, error_handler::AiLlmError};

/// Token accounting reported by the provider, when available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Generated text plus whatever metadata the provider returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    /// Assistant text of the first choice.
    pub content: String,
    /// Model that actually served the request (may differ from the configured alias).
    pub model: Option<String>,
    /// Provider stop reason (`stop`, `length`, ...).
    pub finish_reason: Option<String>,
    pub usage: Option<TokenUsage>,
}

/// A remote text-generation backend.
///
/// Implementations perform exactly one non-streaming call per invocation and
/// never retry; every failure is returned to the caller as [`AiLlmError`].
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Sends the ordered `messages` and waits for the generated reply.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Completion, AiLlmError>;
}
