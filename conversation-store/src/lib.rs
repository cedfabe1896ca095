//! Append-only log of chat turns, queried per user in chronological order.
//!
//! - [`ConversationStore`] is the seam used by the HTTP layer.
//! - [`MongoConversationStore`] persists turns as flat documents
//!   (`user_id`, `role`, `message`, `timestamp`).
//! - [`InMemoryConversationStore`] mirrors the same semantics in process.
//!
//! There is no update or delete; turns are never deduplicated.

mod config;
mod errors;
mod memory;
mod mongo_facade;
mod record;

pub use config::{DEFAULT_COLLECTION, DEFAULT_DATABASE, StoreConfig};
pub use errors::StoreError;
pub use memory::InMemoryConversationStore;
pub use mongo_facade::MongoConversationStore;
pub use record::{ChatTurn, TurnRole};

use async_trait::async_trait;

/// Durable, append-only storage of [`ChatTurn`]s.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Inserts one turn. No uniqueness constraint, no validation.
    async fn append(&self, turn: &ChatTurn) -> Result<(), StoreError>;

    /// Returns the turns of `user_id` sorted by timestamp ascending.
    ///
    /// With `Some(n)` only the `n` most recent turns are returned, still in
    /// ascending order. An unknown user yields an empty vector.
    async fn query(&self, user_id: &str, limit: Option<usize>) -> Result<Vec<ChatTurn>, StoreError>;
}
