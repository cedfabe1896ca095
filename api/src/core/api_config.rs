//! HTTP-side configuration read from environment variables.

use axum::http::HeaderValue;
use conversation_store::{DEFAULT_COLLECTION, DEFAULT_DATABASE, StoreConfig};

use crate::{chat::prompt::DEFAULT_SYSTEM_PROMPT, core::app_state::ConfigError};

pub const DEFAULT_API_ADDRESS: &str = "0.0.0.0:8000";

/// Origins allowed to call the API from a browser.
pub const DEFAULT_CORS_ORIGINS: [&str; 2] = [
    "https://luminaai-fgg6.onrender.com",
    "http://localhost:5173",
];

/// Everything the HTTP service needs besides the LLM client config.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Socket address to bind, e.g. `0.0.0.0:8000`.
    pub address: String,
    /// Where chat turns are stored.
    pub store: StoreConfig,
    /// First message of every prompt.
    pub system_prompt: String,
    /// Cap on replayed turns; `None` replays the whole conversation.
    pub history_limit: Option<usize>,
    /// Browser origins allowed by CORS.
    pub allowed_origins: Vec<HeaderValue>,
}

impl ApiConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key/value source (blank values count as unset).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let uri = get("MONGODB_URI").ok_or(ConfigError::MissingVar("MONGODB_URI"))?;

        let history_limit = match get("HISTORY_LIMIT") {
            None => None,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => Some(n),
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        var: "HISTORY_LIMIT",
                        reason: "expected a positive integer",
                    });
                }
            },
        };

        let allowed_origins = match get("CORS_ALLOWED_ORIGINS") {
            Some(list) => parse_origins(list.split(','))?,
            None => parse_origins(DEFAULT_CORS_ORIGINS)?,
        };

        Ok(Self {
            address: get("API_ADDRESS").unwrap_or_else(|| DEFAULT_API_ADDRESS.to_string()),
            store: StoreConfig {
                uri,
                database: get("MONGODB_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.into()),
                collection: get("MONGODB_COLLECTION").unwrap_or_else(|| DEFAULT_COLLECTION.into()),
            },
            system_prompt: get("SYSTEM_PROMPT").unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.into()),
            history_limit,
            allowed_origins,
        })
    }
}

/// Parses origins into header values, skipping blanks.
pub fn parse_origins<I, S>(origins: I) -> Result<Vec<HeaderValue>, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = Vec::new();
    for raw in origins {
        let origin = raw.as_ref().trim().trim_end_matches('/');
        if origin.is_empty() {
            continue;
        }
        if !(origin.starts_with("http://") || origin.starts_with("https://")) {
            return Err(ConfigError::InvalidOrigin(origin.to_string()));
        }
        let value = HeaderValue::from_str(origin)
            .map_err(|_| ConfigError::InvalidOrigin(origin.to_string()))?;
        out.push(value);
    }
    if out.is_empty() {
        return Err(ConfigError::InvalidOrigin("<empty list>".into()));
    }
    Ok(out)
}
