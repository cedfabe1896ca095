//! Thin adapter around the `mongodb` driver.
//!
//! All driver usage is concentrated here so the rest of the workspace only
//! sees [`ConversationStore`] and [`ChatTurn`].

use async_trait::async_trait;
use bson::{Document, doc};
use futures::TryStreamExt;
use mongodb::{Client, Collection, IndexModel};
use tracing::{debug, info, warn};

use crate::{
    ConversationStore,
    config::StoreConfig,
    errors::StoreError,
    record::{ChatTurn, TurnDocument, TurnRole},
};

/// MongoDB-backed conversation log.
///
/// Cloning is cheap: the driver client is a handle to a shared pool.
#[derive(Clone, Debug)]
pub struct MongoConversationStore {
    collection: Collection<TurnDocument>,
}

impl MongoConversationStore {
    /// Connects to MongoDB using the given configuration.
    ///
    /// The driver connects lazily; this only parses the URI and sets up the
    /// connection pool.
    ///
    /// # Errors
    /// - `StoreError::Config` for an invalid config
    /// - `StoreError::Mongo` if the URI cannot be parsed/resolved
    pub async fn connect(cfg: &StoreConfig) -> Result<Self, StoreError> {
        cfg.validate()?;

        let client = Client::with_uri_str(&cfg.uri).await?;
        let collection = client
            .database(&cfg.database)
            .collection::<TurnDocument>(&cfg.collection);

        info!(
            database = %cfg.database,
            collection = %cfg.collection,
            "conversation store initialized"
        );

        Ok(Self { collection })
    }

    /// Ensures the `(user_id, timestamp)` index used by history queries exists.
    ///
    /// Creating an index that already exists is a no-op on the server.
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let model = IndexModel::builder()
            .keys(doc! { "user_id": 1, "timestamp": 1 })
            .build();
        match self.collection.create_index(model).await {
            Ok(res) => {
                debug!(index = %res.index_name, "history index ready");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "failed to ensure history index");
                Err(err.into())
            }
        }
    }
}

#[async_trait]
impl ConversationStore for MongoConversationStore {
    async fn append(&self, turn: &ChatTurn) -> Result<(), StoreError> {
        let res = self
            .collection
            .insert_one(TurnDocument::from(turn))
            .await?;
        debug!(
            user_id = %turn.user_id,
            role = turn.role.as_str(),
            id = %res.inserted_id,
            "turn appended"
        );
        Ok(())
    }

    async fn query(&self, user_id: &str, limit: Option<usize>) -> Result<Vec<ChatTurn>, StoreError> {
        let filter = history_filter(user_id);

        let docs: Vec<TurnDocument> = match limit {
            None => {
                self.collection
                    .find(filter)
                    .sort(history_sort(false))
                    .await?
                    .try_collect::<Vec<_>>()
                    .await?
            }
            Some(0) => Vec::new(),
            Some(n) => {
                let mut newest_first: Vec<TurnDocument> = self
                    .collection
                    .find(filter)
                    .sort(history_sort(true))
                    .limit(i64::try_from(n).unwrap_or(i64::MAX))
                    .await?
                    .try_collect::<Vec<_>>()
                    .await?;
                newest_first.reverse();
                newest_first
            }
        };

        let fetched = docs.len();
        let turns: Vec<ChatTurn> = docs
            .into_iter()
            .filter_map(|d| {
                let role = d.role.clone();
                let turn = d.into_turn();
                if turn.is_none() {
                    warn!(user_id, %role, "skipping stored turn with unknown role");
                }
                turn
            })
            .collect();

        debug!(user_id, fetched, kept = turns.len(), "history loaded");
        Ok(turns)
    }
}

/// Matches the turns of one user that can be replayed.
///
/// Roles are filtered server-side so documents with an unknown role never
/// take one of the `limit` slots.
fn history_filter(user_id: &str) -> Document {
    let roles: Vec<&str> = [TurnRole::User, TurnRole::Assistant]
        .into_iter()
        .map(TurnRole::as_str)
        .collect();
    doc! { "user_id": user_id, "role": { "$in": roles } }
}

/// Chronological sort; `_id` breaks ties between turns stored within the same
/// millisecond.
fn history_sort(newest_first: bool) -> Document {
    let dir = if newest_first { -1 } else { 1 };
    doc! { "timestamp": dir, "_id": dir }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_only_matches_replayable_roles() {
        let filter = history_filter("u1");

        assert_eq!(filter.get_str("user_id").unwrap(), "u1");
        let roles = filter.get_document("role").unwrap().get_array("$in").unwrap();
        let roles: Vec<&str> = roles.iter().filter_map(|r| r.as_str()).collect();
        assert_eq!(roles, vec!["user", "assistant"]);
    }

    #[test]
    fn sort_keys_put_timestamp_before_id() {
        let asc = history_sort(false);
        let keys: Vec<&String> = asc.keys().collect();
        assert_eq!(keys, vec!["timestamp", "_id"]);
        assert_eq!(asc.get_i32("timestamp").unwrap(), 1);

        let desc = history_sort(true);
        assert_eq!(desc.get_i32("timestamp").unwrap(), -1);
        assert_eq!(desc.get_i32("_id").unwrap(), -1);
    }
}
