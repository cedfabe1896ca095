//! Default LLM config loaded from environment variables.
//!
//! # Environment variables
//!
//! - `GROQ_API_KEY`     = credential (mandatory)
//! - `GROQ_URL`         = API base (default `https://api.groq.com/openai`)
//! - `GROQ_MODEL`       = model id (default `openai/gpt-oss-20b`)
//! - `LLM_MAX_TOKENS`   = optional max tokens (u32)
//! - `LLM_TEMPERATURE`  = optional temperature (`0.0..=2.0`)
//! - `LLM_TIMEOUT_SECS` = request timeout (default 60)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, env_opt_f32, env_opt_u32, env_opt_u64, env_or, must_env},
};

pub const DEFAULT_GROQ_URL: &str = "https://api.groq.com/openai";
pub const DEFAULT_GROQ_MODEL: &str = "openai/gpt-oss-20b";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Constructs the chat config for the Groq-hosted model.
///
/// # Errors
///
/// - [`crate::ConfigError::MissingVar`] if `GROQ_API_KEY` is missing
/// - [`crate::ConfigError::InvalidNumber`] for malformed numeric knobs
/// - any error from [`LlmModelConfig::validate`]
pub fn config_groq_chat() -> Result<LlmModelConfig, AiLlmError> {
    let api_key = must_env("GROQ_API_KEY")?;

    let cfg = LlmModelConfig {
        provider: LlmProvider::Groq,
        model: env_or("GROQ_MODEL", DEFAULT_GROQ_MODEL),
        endpoint: env_or("GROQ_URL", DEFAULT_GROQ_URL),
        api_key: Some(api_key),
        max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
        temperature: env_opt_f32("LLM_TEMPERATURE")?,
        top_p: None,
        timeout_secs: Some(env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS)),
    };
    cfg.validate()?;
    Ok(cfg)
}
