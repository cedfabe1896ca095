use serde::{Deserialize, Serialize};

/// Request payload for `/chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Opaque caller identifier; all turns are grouped by it.
    pub user_id: String,
    /// New user message.
    pub question: String,
}

/// Response payload for `/chat`.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// Assistant reply (plain text).
    pub response: String,
}
