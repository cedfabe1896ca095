//! Conversation plumbing between the store and the completion client.

pub mod history;
pub mod prompt;
