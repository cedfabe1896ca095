//! Process-local store with the same ordering semantics as the MongoDB one.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{ConversationStore, errors::StoreError, record::ChatTurn};

/// In-memory conversation log.
///
/// Turns are kept in insertion order; queries return them ordered by
/// timestamp with insertion order as the tie-breaker.
#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    turns: RwLock<Vec<ChatTurn>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored turn, across all users, in insertion order.
    pub async fn snapshot(&self) -> Vec<ChatTurn> {
        self.turns.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.turns.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.turns.read().await.is_empty()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn append(&self, turn: &ChatTurn) -> Result<(), StoreError> {
        self.turns.write().await.push(turn.clone());
        Ok(())
    }

    async fn query(&self, user_id: &str, limit: Option<usize>) -> Result<Vec<ChatTurn>, StoreError> {
        let mut matching: Vec<ChatTurn> = self
            .turns
            .read()
            .await
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        // Stable sort keeps insertion order for equal timestamps.
        matching.sort_by_key(|t| t.timestamp);

        if let Some(n) = limit {
            let skip = matching.len().saturating_sub(n);
            matching.drain(..skip);
        }
        Ok(matching)
    }
}
