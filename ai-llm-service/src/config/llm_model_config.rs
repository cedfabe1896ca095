use crate::{
    config::llm_provider::LlmProvider,
    error_handler::{AiLlmError, ConfigError, validate_http_endpoint, validate_range_f32},
};

/// Configuration for an LLM model invocation.
///
/// # Fields
///
/// - `provider`: Which backend to use (Groq).
/// - `model`: The model identifier (e.g., `"openai/gpt-oss-20b"`).
/// - `endpoint`: API base URL; `/v1/chat/completions` is appended to it.
/// - `api_key`: Bearer credential.
/// - `max_tokens`: Maximum number of tokens to generate (if supported).
/// - `temperature`: Controls randomness (0.0 = deterministic).
/// - `top_p`: Nucleus sampling cutoff.
/// - `timeout_secs`: Optional request timeout in seconds.
///
/// # Examples
///
/// ```
/// use ai_llm_service::{LlmModelConfig, LlmProvider};
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::Groq,
///     model: "openai/gpt-oss-20b".to_string(),
///     endpoint: "https://api.groq.com/openai".to_string(),
///     api_key: Some("gsk_...".to_string()),
///     max_tokens: None,
///     temperature: None,
///     top_p: None,
///     timeout_secs: Some(60),
/// };
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The LLM provider/backend.
    pub provider: LlmProvider,

    /// Model identifier string.
    pub model: String,

    /// Remote API base URL.
    pub endpoint: String,

    /// API key for authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

impl LlmModelConfig {
    /// Checks the values that can be validated without a network call.
    ///
    /// # Errors
    /// - [`ConfigError::EmptyModel`] for a blank model name
    /// - [`ConfigError::InvalidFormat`] for a non-http(s) endpoint
    /// - [`ConfigError::OutOfRange`] for `temperature`/`top_p` outside their ranges
    pub fn validate(&self) -> Result<(), AiLlmError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }
        validate_http_endpoint("endpoint", self.endpoint.trim())?;
        if let Some(t) = self.temperature {
            validate_range_f32("temperature", t, 0.0, 2.0)?;
        }
        if let Some(p) = self.top_p {
            validate_range_f32("top_p", p, 0.0, 1.0)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Groq,
            model: "openai/gpt-oss-20b".into(),
            endpoint: "https://api.groq.com/openai".into(),
            api_key: Some("k".into()),
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: None,
        }
    }

    #[test]
    fn accepts_defaults() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn rejects_blank_model() {
        let cfg = LlmModelConfig {
            model: "  ".into(),
            ..base()
        };
        assert!(matches!(
            cfg.validate(),
            Err(AiLlmError::Config(ConfigError::EmptyModel))
        ));
    }

    #[test]
    fn rejects_out_of_range_sampling() {
        let hot = LlmModelConfig {
            temperature: Some(3.0),
            ..base()
        };
        assert!(hot.validate().is_err());

        let wide = LlmModelConfig {
            top_p: Some(1.5),
            ..base()
        };
        assert!(wide.validate().is_err());
    }
}
