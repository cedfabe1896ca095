//! OpenAI-compatible chat-completion client (Groq).
//!
//! Minimal, non-streaming client around the chat-completions REST API.
//! The URL is derived from `LlmModelConfig::endpoint`:
//! - POST {endpoint}/v1/chat/completions
//!
//! Constructor validation:
//! - `cfg.api_key` must be present
//! - `cfg.endpoint` must start with http:// or https://
//!
//! Errors are normalized via unified error types in `error_handler`.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{
    chat_message::ChatMessage,
    completion::{ChatCompletion, Completion, TokenUsage},
    config::{default_config::DEFAULT_TIMEOUT_SECS, llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, HttpError, Provider, ProviderError, ProviderErrorKind, make_snippet},
};

/// Thin client for an OpenAI-compatible chat API.
///
/// Constructed from a complete [`LlmModelConfig`]. Internally keeps a
/// preconfigured `reqwest::Client` (with timeout and default headers) that is
/// reused, with its connection pool, for every call.
#[derive(Debug)]
pub struct OpenAiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    provider: Provider,
    url_chat: String,
}

impl OpenAiService {
    /// Creates a new [`OpenAiService`] from the given config.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `MissingApiKey` if `cfg.api_key` is `None`
    /// - [`AiLlmError::Provider`] with `InvalidEndpoint` if `cfg.endpoint` is invalid
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        let provider = match cfg.provider {
            LlmProvider::Groq => Provider::Groq,
        };

        let api_key = cfg
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ProviderError::new(provider, ProviderErrorKind::MissingApiKey))?;

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::new(
                provider,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        let timeout_secs = cfg.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);

        let mut headers = header::HeaderMap::new();
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
            ProviderError::new(
                provider,
                ProviderErrorKind::Decode(format!("invalid API key header: {e}")),
            )
        })?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(headers)
            .build()?;

        let url_chat = format!("{}/v1/chat/completions", endpoint.trim_end_matches('/'));

        info!(
            provider = %provider,
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs,
            "chat completion client initialized"
        );

        Ok(Self {
            client,
            cfg,
            provider,
            url_chat,
        })
    }

    /// Full URL used for chat completions.
    pub fn chat_url(&self) -> &str {
        &self.url_chat
    }

    /// Performs a **non-streaming** chat completion request.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `HttpStatus` for non-2xx responses
    /// - [`AiLlmError::HttpTransport`] for client/network failures and timeouts
    /// - [`AiLlmError::Provider`] with `Decode` if the JSON cannot be parsed
    /// - [`AiLlmError::Provider`] with `EmptyChoices` if no choice carries content
    pub async fn generate(&self, messages: &[ChatMessage]) -> Result<Completion, AiLlmError> {
        let started = Instant::now();
        let body = ChatCompletionRequest::from_cfg(&self.cfg, messages);

        debug!(
            model = %self.cfg.model,
            messages = messages.len(),
            prompt_chars = messages.iter().map(|m| m.content.len()).sum::<usize>(),
            "POST {}", self.url_chat
        );

        let resp = self.client.post(&self.url_chat).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_chat.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "chat completion returned non-success status"
            );

            return Err(ProviderError::new(
                self.provider,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url,
                    snippet,
                }),
            )
            .into());
        }

        let out: ChatCompletionResponse = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                error!(
                    error = %e,
                    model = %self.cfg.model,
                    latency_ms = started.elapsed().as_millis(),
                    "failed to decode chat completion response"
                );
                return Err(ProviderError::new(
                    self.provider,
                    ProviderErrorKind::Decode(format!(
                        "serde error: {e}; expected `choices[0].message.content`"
                    )),
                )
                .into());
            }
        };

        let completion = out.into_completion(self.provider)?;

        info!(
            model = %completion.model.as_deref().unwrap_or(&self.cfg.model),
            finish_reason = %completion.finish_reason.as_deref().unwrap_or("n/a"),
            total_tokens = completion.usage.map(|u| u.total_tokens).unwrap_or(0),
            latency_ms = started.elapsed().as_millis(),
            "chat completion completed"
        );

        Ok(completion)
    }
}

#[async_trait]
impl ChatCompletion for OpenAiService {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Completion, AiLlmError> {
        self.generate(messages).await
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Request body for `/v1/chat/completions` (non-streaming).
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl<'a> ChatCompletionRequest<'a> {
    fn from_cfg(cfg: &'a LlmModelConfig, messages: &'a [ChatMessage]) -> Self {
        Self {
            model: &cfg.model,
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            stream: false,
            temperature: cfg.temperature,
            top_p: cfg.top_p,
            max_tokens: cfg.max_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

impl ChatCompletionResponse {
    /// Takes the first choice that carries content.
    fn into_completion(self, provider: Provider) -> Result<Completion, ProviderError> {
        let (content, finish_reason) = self
            .choices
            .into_iter()
            .find_map(|c| c.message.content.map(|text| (text, c.finish_reason)))
            .ok_or_else(|| ProviderError::new(provider, ProviderErrorKind::EmptyChoices))?;

        Ok(Completion {
            content,
            model: self.model,
            finish_reason,
            usage: self.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageOut,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}
