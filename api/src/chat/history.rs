//! Rebuilds the prompt history of a user from stored turns.

use ai_llm_service::ChatMessage;
use conversation_store::{ChatTurn, ConversationStore, StoreError, TurnRole};
use tracing::debug;

/// Loads the turns of `user_id` (oldest first) as role-tagged messages.
///
/// `limit` keeps only the most recent turns; `None` loads everything.
/// An unknown user yields an empty history.
pub async fn load_history(
    store: &dyn ConversationStore,
    user_id: &str,
    limit: Option<usize>,
) -> Result<Vec<ChatMessage>, StoreError> {
    let turns = store.query(user_id, limit).await?;
    debug!(user_id, turns = turns.len(), "history reconstructed");
    Ok(turns.into_iter().map(to_message).collect())
}

fn to_message(turn: ChatTurn) -> ChatMessage {
    match turn.role {
        TurnRole::User => ChatMessage::user(turn.message),
        TurnRole::Assistant => ChatMessage::assistant(turn.message),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use conversation_store::InMemoryConversationStore;

    use super::*;

    #[tokio::test]
    async fn unknown_user_yields_empty_history() {
        let store = InMemoryConversationStore::new();
        let history = load_history(&store, "ghost", None).await.unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn turns_map_to_messages_in_timestamp_order() {
        let store = InMemoryConversationStore::new();
        let t0 = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        let turns = [
            ChatTurn::new("u1", TurnRole::Assistant, "a1", t0 + Duration::seconds(1)),
            ChatTurn::new("u1", TurnRole::User, "q2", t0 + Duration::seconds(2)),
            ChatTurn::new("u1", TurnRole::User, "q1", t0),
        ];
        for t in &turns {
            store.append(t).await.unwrap();
        }

        let history = load_history(&store, "u1", None).await.unwrap();
        assert_eq!(
            history,
            vec![
                ChatMessage::user("q1"),
                ChatMessage::assistant("a1"),
                ChatMessage::user("q2"),
            ]
        );
    }

    #[tokio::test]
    async fn limit_is_forwarded_to_the_store() {
        let store = InMemoryConversationStore::new();
        let t0 = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        for i in 0..6 {
            let (q, a) = ChatTurn::exchange(
                "u1",
                format!("q{i}"),
                format!("a{i}"),
                t0 + Duration::minutes(i),
                t0 + Duration::minutes(i),
            );
            store.append(&q).await.unwrap();
            store.append(&a).await.unwrap();
        }

        let history = load_history(&store, "u1", Some(2)).await.unwrap();
        assert_eq!(
            history,
            vec![ChatMessage::user("q5"), ChatMessage::assistant("a5")]
        );
    }
}
