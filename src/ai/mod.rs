//! AI module for SDA Assistant
//!
//! Relays user input to the remote inference webhook and turns whatever comes
//! back into a bot reply. Transport and decode failures never reach the
//! caller; they become a fixed fallback reply.
//!
//! # Architecture
//!
//! - `client` - `InferenceClient`, the error types and the `InferenceBackend` seam
//! - `webhook` - reqwest backend for the `{ "message": ... }` webhook and its response decode
//!
//! # Usage
//!
//! ```rust,no_run
//! use sda_assistant::ai::{InferenceClient, WebhookBackend};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let backend = WebhookBackend::new("http://localhost:5678/webhook/chatbot-sda", None)?;
//! let client = InferenceClient::new(backend);
//! let outcome = client.reply("Berapa curah hujan hari ini?").await;
//! println!("{}", outcome.text());
//! # Ok(())
//! # }
//! ```

mod client;
mod webhook;

pub use client::{
    ChatError, ChatResult, InferenceBackend, InferenceClient, TRANSPORT_FAILURE_REPLY,
};
pub use webhook::{ReplyFields, ReplyShape, UNUSABLE_REPLY, WebhookBackend, decode_reply};
