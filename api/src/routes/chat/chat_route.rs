//! POST /chat: answers a question with the user's full conversation as context.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use chrono::Utc;
use conversation_store::ChatTurn;
use tracing::{Span, error, field, info, instrument};

use crate::{
    chat::{history::load_history, prompt::compose_messages},
    core::app_state::AppState,
    error_handler::AppResult,
    routes::chat::chat_request::{ChatRequest, ChatResponse},
};

/// Handler: POST /chat
///
/// The completion is requested before anything is written, so a failed model
/// call stores nothing. Both turns are stamped at write time, after the model
/// answered, so an exchange is never split by a concurrent request of the same
/// user. The two inserts are independent: if the reply insert fails, the
/// question stays stored without an answer.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/chat \
///   -H 'content-type: application/json' \
///   -d '{"user_id":"u1","question":"How do I structure a Rust workspace?"}'
/// ```
#[instrument(name = "chat", skip_all, fields(user_id = field::Empty))]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let Json(body) = payload?;
    Span::current().record("user_id", body.user_id.as_str());

    let history = load_history(state.store.as_ref(), &body.user_id, state.history_limit).await?;
    let history_len = history.len();
    let messages = compose_messages(&state.system_prompt, history, &body.question);

    let completion = state.llm.complete(&messages).await?;
    let stored_at = Utc::now();

    let (user_turn, assistant_turn) = ChatTurn::exchange(
        &body.user_id,
        body.question,
        completion.content.clone(),
        stored_at,
        Utc::now(),
    );

    state.store.append(&user_turn).await?;
    if let Err(err) = state.store.append(&assistant_turn).await {
        error!(error = %err, "reply not stored; question left without an answer");
        return Err(err.into());
    }

    info!(
        history_len,
        reply_chars = completion.content.len(),
        "chat turn completed"
    );

    Ok(Json(ChatResponse {
        response: completion.content,
    }))
}
