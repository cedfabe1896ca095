//! Unified error handling for `ai-llm-service`.
//!
//! This module exposes a single top-level error type [`AiLlmError`] for the whole
//! library, and groups domain-specific errors in nested types ([`ConfigError`],
//! [`ProviderError`]). Small helpers for reading/validating environment variables are
//! provided and return the unified [`Result<T>`] alias.
//!
//! All messages include the suffix `[AI LLM Service]` to simplify attribution in logs.

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, AiLlmError>;

/// Maximum number of characters of an upstream body kept in error messages.
const SNIPPET_MAX_CHARS: usize = 300;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `ai-llm-service` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AiLlmError {
    /// Configuration/validation errors (startup).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Upstream provider answered, but not with something usable.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Underlying HTTP transport error (connect, TLS, timeout).
    #[error("[AI LLM Service] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("[AI LLM Service] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (like limits, timeouts).
    #[error("[AI LLM Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `LLM_MAX_TOKENS`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u32`).
        reason: &'static str,
    },

    /// Value had the wrong format (e.g., invalid URL).
    #[error("[AI LLM Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        var: &'static str,
        reason: &'static str,
    },

    /// A numeric field was outside of the allowed range.
    #[error("[AI LLM Service] {field} is out of range: {detail}")]
    OutOfRange {
        field: &'static str,
        detail: &'static str,
    },

    /// Model name was empty.
    #[error("[AI LLM Service] model name must not be empty")]
    EmptyModel,
}

/* ------------------------------------------------------------------------- */
/* Provider errors                                                           */
/* ------------------------------------------------------------------------- */

/// Which backend produced a [`ProviderError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Groq,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Groq => f.write_str("Groq"),
        }
    }
}

/// Non-success HTTP answer from a provider.
#[derive(Debug, Clone)]
pub struct HttpError {
    pub status: StatusCode,
    pub url: String,
    /// Trimmed beginning of the response body.
    pub snippet: String,
}

/// What went wrong while talking to a provider.
#[derive(Debug, Error)]
pub enum ProviderErrorKind {
    #[error("API key is missing")]
    MissingApiKey,

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("HTTP {} from {}: {}", .0.status, .0.url, .0.snippet)]
    HttpStatus(HttpError),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("response contained no choices")]
    EmptyChoices,
}

/// Provider-scoped failure.
#[derive(Debug, Error)]
#[error("[AI LLM Service] {provider}: {kind}")]
pub struct ProviderError {
    pub provider: Provider,
    pub kind: ProviderErrorKind,
}

impl ProviderError {
    pub fn new(provider: Provider, kind: ProviderErrorKind) -> Self {
        Self { provider, kind }
    }
}

/// Produces a single-line, bounded excerpt of an upstream body for logs/errors.
pub fn make_snippet(body: &str) -> String {
    let flat: String = body
        .trim()
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    if flat.chars().count() <= SNIPPET_MAX_CHARS {
        flat
    } else {
        let mut cut: String = flat.chars().take(SNIPPET_MAX_CHARS).collect();
        cut.push('…');
        cut
    }
}

/* ------------------------------------------------------------------------- */
/* Env helpers (return unified `Result<T>`)                                  */
/* ------------------------------------------------------------------------- */

/// Fetches a required, non-empty environment variable.
///
/// # Errors
/// Returns [`AiLlmError::Config`] with [`ConfigError::MissingVar`] if the
/// variable is absent or empty.
pub fn must_env(name: &'static str) -> Result<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(name).into()),
    }
}

/// Reads an optional variable, falling back to `default` when unset or empty.
pub fn env_or(name: &'static str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Parses an optional `u32` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`ConfigError::InvalidNumber`] if the variable is set but not a valid `u32`.
pub fn env_opt_u32(name: &'static str) -> Result<Option<u32>> {
    env_opt_parse(name, "expected u32")
}

/// Parses an optional `u64` from env (`Ok(None)` if unset/empty).
pub fn env_opt_u64(name: &'static str) -> Result<Option<u64>> {
    env_opt_parse(name, "expected u64")
}

/// Parses an optional `f32` from env (`Ok(None)` if unset/empty).
pub fn env_opt_f32(name: &'static str) -> Result<Option<f32>> {
    env_opt_parse(name, "expected a decimal number")
}

fn env_opt_parse<T: std::str::FromStr>(
    name: &'static str,
    reason: &'static str,
) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| AiLlmError::from(ConfigError::InvalidNumber { var: name, reason })),
        _ => Ok(None),
    }
}

/* ------------------------------------------------------------------------- */
/* Validation helpers                                                        */
/* ------------------------------------------------------------------------- */

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
///
/// # Errors
/// Returns [`ConfigError::InvalidFormat`] when the scheme is missing.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

/// Validates that a floating-point value lies within an inclusive range.
///
/// # Errors
/// Returns [`ConfigError::OutOfRange`] if `value` is outside `[min, max]`.
pub fn validate_range_f32(field: &'static str, value: f32, min: f32, max: f32) -> Result<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            detail: "expected value in inclusive range",
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_is_flattened_and_bounded() {
        assert_eq!(make_snippet("  {\"error\":\n\"bad\"}  "), "{\"error\": \"bad\"}");

        let long = "x".repeat(SNIPPET_MAX_CHARS + 50);
        let s = make_snippet(&long);
        assert_eq!(s.chars().count(), SNIPPET_MAX_CHARS + 1);
        assert!(s.ends_with('…'));
    }

    #[test]
    fn endpoint_requires_http_scheme() {
        assert!(validate_http_endpoint("GROQ_URL", "https://api.groq.com/openai").is_ok());
        assert!(validate_http_endpoint("GROQ_URL", "http://localhost:8080").is_ok());
        let err = validate_http_endpoint("GROQ_URL", "api.groq.com").unwrap_err();
        assert!(matches!(
            err,
            AiLlmError::Config(ConfigError::InvalidFormat { var: "GROQ_URL", .. })
        ));
    }

    #[test]
    fn range_rejects_nan_and_out_of_bounds() {
        assert!(validate_range_f32("temperature", 0.7, 0.0, 2.0).is_ok());
        assert!(validate_range_f32("temperature", 2.5, 0.0, 2.0).is_err());
        assert!(validate_range_f32("temperature", f32::NAN, 0.0, 2.0).is_err());
    }

    #[test]
    fn provider_error_message_names_provider() {
        let err = ProviderError::new(Provider::Groq, ProviderErrorKind::EmptyChoices);
        assert_eq!(
            err.to_string(),
            "[AI LLM Service] Groq: response contained no choices"
        );
    }
}
