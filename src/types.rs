use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

pub const DEFAULT_TITLE: &str = "Chat Baru";
pub const GREETING: &str = "Halo! Saya SDA Assistant. Ada yang bisa saya bantu?";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// Label used in transcripts and the message header.
    pub fn label(self) -> &'static str {
        match self {
            Sender::User => "Anda",
            Sender::Bot => "SDA Assistant",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(u64);

impl MessageId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    pub timestamp: OffsetDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatSession {
    pub id: SessionId,
    pub title: String,
    pub messages: Vec<Message>,
    pub last_updated: OffsetDateTime,
}

impl ChatSession {
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Export actions are only offered once the conversation goes past the greeting.
    pub fn has_conversation(&self) -> bool {
        self.messages.len() > 1
    }
}

/// Result of one round-trip to the inference endpoint, as seen by the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplyOutcome {
    Answered(String),
    Failed(String),
}

impl ReplyOutcome {
    pub fn text(&self) -> &str {
        match self {
            ReplyOutcome::Answered(text) | ReplyOutcome::Failed(text) => text,
        }
    }

    /// Failure replies leave the session's `last_updated` stale.
    pub fn touches_last_updated(&self) -> bool {
        matches!(self, ReplyOutcome::Answered(_))
    }
}
