//! Unified error types for the crate.

use thiserror::Error;

/// Top-level error for conversation-store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// MongoDB driver errors (connect, query, insert).
    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),
}
