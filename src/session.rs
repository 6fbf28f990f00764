//! Chat session store.
//!
//! Owns the ordered collection of sessions, the active-session pointer and the
//! single in-flight send slot. Every operation that can "fail" is a silent
//! no-op from the caller's point of view: it reports what happened through its
//! return value and never panics.

use crate::types::{
    ChatSession, DEFAULT_TITLE, GREETING, Message, MessageId, ReplyOutcome, Sender, SessionId,
};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

const TITLE_MAX_CHARS: usize = 30;
const TITLE_ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SendRejected {
    #[error("message text is empty")]
    EmptyText,

    #[error("a send is already in flight")]
    SendInFlight,

    #[error("session not found")]
    UnknownSession,
}

/// A user message that was accepted and is now waiting for a bot reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    pub session_id: SessionId,
    pub message_id: MessageId,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Vec<ChatSession>,
    active: Option<SessionId>,
    in_flight: Option<SessionId>,
    next_message_id: u64,
}

/// Shorten the first user message into a sidebar title.
pub fn derive_title(text: &str) -> String {
    let mut title: String = text.chars().take(TITLE_MAX_CHARS).collect();
    if text.chars().count() > TITLE_MAX_CHARS {
        title.push_str(TITLE_ELLIPSIS);
    }
    title
}

fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with one fresh session, the way the app starts up.
    pub fn with_initial_session() -> Self {
        let mut store = Self::new();
        store.create_session();
        store
    }

    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    pub fn active_id(&self) -> Option<&SessionId> {
        self.active.as_ref()
    }

    pub fn is_sending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Session awaiting a reply, if any.
    pub fn sending_session(&self) -> Option<&SessionId> {
        self.in_flight.as_ref()
    }

    pub fn get(&self, id: &SessionId) -> Option<&ChatSession> {
        self.sessions.iter().find(|session| &session.id == id)
    }

    fn get_mut(&mut self, id: &SessionId) -> Option<&mut ChatSession> {
        self.sessions.iter_mut().find(|session| &session.id == id)
    }

    pub fn current_session(&self) -> Option<&ChatSession> {
        self.active.as_ref().and_then(|id| self.get(id))
    }

    fn next_message_id(&mut self) -> MessageId {
        self.next_message_id += 1;
        MessageId::new(self.next_message_id)
    }

    fn build_message(&mut self, sender: Sender, text: String, timestamp: OffsetDateTime) -> Message {
        Message {
            id: self.next_message_id(),
            text,
            sender,
            timestamp,
        }
    }

    /// Create a session seeded with the greeting, put it first and make it active.
    pub fn create_session(&mut self) -> SessionId {
        let created_at = now();
        let greeting = self.build_message(Sender::Bot, GREETING.to_string(), created_at);
        let id = SessionId::generate();
        self.sessions.insert(
            0,
            ChatSession {
                id: id.clone(),
                title: DEFAULT_TITLE.to_string(),
                messages: vec![greeting],
                last_updated: created_at,
            },
        );
        self.active = Some(id.clone());
        info!(session = %id, "created chat session");
        id
    }

    /// Returns `false` (and keeps the current pointer) when `id` is unknown.
    pub fn select_session(&mut self, id: &SessionId) -> bool {
        if self.get(id).is_none() {
            debug!(session = %id, "ignoring selection of unknown session");
            return false;
        }
        self.active = Some(id.clone());
        true
    }

    pub fn delete_session(&mut self, id: &SessionId) -> bool {
        let before = self.sessions.len();
        self.sessions.retain(|session| &session.id != id);
        if self.sessions.len() == before {
            return false;
        }
        if self.active.as_ref() == Some(id) {
            self.active = self.sessions.first().map(|session| session.id.clone());
        }
        info!(session = %id, remaining = self.sessions.len(), "deleted chat session");
        true
    }

    /// Accept a user message and open the in-flight slot for its reply.
    pub fn append_user_message(
        &mut self,
        session_id: &SessionId,
        text: &str,
    ) -> Result<PendingSend, SendRejected> {
        if text.trim().is_empty() {
            return Err(SendRejected::EmptyText);
        }
        if self.in_flight.is_some() {
            return Err(SendRejected::SendInFlight);
        }
        if self.get(session_id).is_none() {
            return Err(SendRejected::UnknownSession);
        }

        let sent_at = now();
        let message = self.build_message(Sender::User, text.to_string(), sent_at);
        let message_id = message.id;
        let session = self
            .get_mut(session_id)
            .ok_or(SendRejected::UnknownSession)?;
        if session.messages.len() == 1 {
            session.title = derive_title(text);
        }
        session.messages.push(message);
        session.last_updated = sent_at;

        self.in_flight = Some(session_id.clone());
        debug!(session = %session_id, "user message appended; awaiting reply");
        Ok(PendingSend {
            session_id: session_id.clone(),
            message_id,
            text: text.to_string(),
        })
    }

    /// Low-level bot append. Returns `None` when the session no longer exists.
    pub fn append_bot_message(
        &mut self,
        session_id: &SessionId,
        text: &str,
        touch_last_updated: bool,
    ) -> Option<MessageId> {
        self.get(session_id)?;
        let received_at = now();
        let message = self.build_message(Sender::Bot, text.to_string(), received_at);
        let message_id = message.id;
        let session = self.get_mut(session_id)?;
        session.messages.push(message);
        if touch_last_updated {
            session.last_updated = received_at;
        }
        Some(message_id)
    }

    /// Route a reply to the session captured when the send started and free
    /// the in-flight slot, whatever the outcome.
    pub fn complete_send(&mut self, outcome: &ReplyOutcome) -> Option<MessageId> {
        let Some(target) = self.in_flight.take() else {
            warn!("reply arrived with no send in flight");
            return None;
        };
        let appended =
            self.append_bot_message(&target, outcome.text(), outcome.touches_last_updated());
        if appended.is_none() {
            debug!(session = %target, "session removed before reply arrived; dropping reply");
        }
        appended
    }
}
