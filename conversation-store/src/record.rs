//! Chat-turn records and their persisted document shape.

use bson::oid::ObjectId;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl TurnRole {
    pub fn as_str(self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }

    /// Parses the stored role string; unknown roles yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "user" => Some(TurnRole::User),
            "assistant" => Some(TurnRole::Assistant),
            _ => None,
        }
    }
}

/// One message of a conversation. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub user_id: String,
    pub role: TurnRole,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    pub fn new(
        user_id: impl Into<String>,
        role: TurnRole,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            message: message.into(),
            timestamp,
        }
    }

    /// Builds the user/assistant pair of one exchange.
    ///
    /// `asked_at` is the write time of the question, not the arrival time of
    /// the request.
    ///
    /// Stored datetimes keep millisecond precision, so the reply is stamped at
    /// least one millisecond after the question to keep replay order stable.
    pub fn exchange(
        user_id: &str,
        question: impl Into<String>,
        answer: impl Into<String>,
        asked_at: DateTime<Utc>,
        answered_at: DateTime<Utc>,
    ) -> (Self, Self) {
        let asked_at = truncate_to_millis(asked_at);
        let floor = asked_at + Duration::milliseconds(1);
        let answered_at = truncate_to_millis(answered_at).max(floor);
        (
            Self::new(user_id, TurnRole::User, question, asked_at),
            Self::new(user_id, TurnRole::Assistant, answer, answered_at),
        )
    }
}

fn truncate_to_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ts.timestamp_millis()).unwrap_or(ts)
}

/// Document layout of the `users` collection.
///
/// `role` stays a plain string so documents written by other tools with an
/// unexpected role can still be read (and skipped).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TurnDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub role: String,
    pub message: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub timestamp: DateTime<Utc>,
}

impl From<&ChatTurn> for TurnDocument {
    fn from(turn: &ChatTurn) -> Self {
        Self {
            id: None,
            user_id: turn.user_id.clone(),
            role: turn.role.as_str().to_string(),
            message: turn.message.clone(),
            timestamp: turn.timestamp,
        }
    }
}

impl TurnDocument {
    /// Converts back to a [`ChatTurn`], or `None` for unknown roles.
    pub fn into_turn(self) -> Option<ChatTurn> {
        let role = TurnRole::parse(&self.role)?;
        Some(ChatTurn {
            user_id: self.user_id,
            role,
            message: self.message,
            timestamp: self.timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use bson::{Bson, doc};
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn document_uses_flat_field_names() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let turn = ChatTurn::new("u1", TurnRole::User, "hello", ts);
        let doc = bson::to_document(&TurnDocument::from(&turn)).unwrap();

        assert!(!doc.contains_key("_id"));
        assert_eq!(doc.get_str("user_id").unwrap(), "u1");
        assert_eq!(doc.get_str("role").unwrap(), "user");
        assert_eq!(doc.get_str("message").unwrap(), "hello");
        assert!(matches!(doc.get("timestamp"), Some(Bson::DateTime(_))));
    }

    #[test]
    fn unknown_role_is_skipped() {
        let raw = doc! {
            "_id": ObjectId::new(),
            "user_id": "u1",
            "role": "system",
            "message": "internal note",
            "timestamp": bson::DateTime::now(),
        };
        let parsed: TurnDocument = bson::from_document(raw).unwrap();
        assert!(parsed.into_turn().is_none());
    }

    #[test]
    fn exchange_orders_reply_after_question() {
        let t = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let (q, a) = ChatTurn::exchange("u1", "hi", "hello", t, t);

        assert_eq!(q.role, TurnRole::User);
        assert_eq!(a.role, TurnRole::Assistant);
        assert!(a.timestamp > q.timestamp);
        assert_eq!((a.timestamp - q.timestamp).num_milliseconds(), 1);

        let later = t + Duration::seconds(3);
        let (_, a) = ChatTurn::exchange("u1", "hi", "hello", t, later);
        assert_eq!(a.timestamp, later);
    }
}
