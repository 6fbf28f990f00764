use crate::types::ReplyOutcome;
use async_trait::async_trait;
use tracing::{debug, error};

/// Bot text appended when the webhook cannot be reached or answers garbage.
pub const TRANSPORT_FAILURE_REPLY: &str = "Maaf, terjadi kesalahan dalam menghubungi server.";

// ============================================
// Error Types
// ============================================

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("request to inference endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("inference endpoint returned a non-JSON body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid inference endpoint configuration: {0}")]
    Config(String),
}

pub type ChatResult<T> = Result<T, ChatError>;

// ============================================
// Backend seam
// ============================================

/// One request, one reply. Implementations resolve the reply text, including
/// the "could not process" fallback for unusable payloads.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    async fn complete(&self, message: &str) -> ChatResult<String>;
}

#[async_trait]
impl<T: InferenceBackend + ?Sized> InferenceBackend for std::sync::Arc<T> {
    async fn complete(&self, message: &str) -> ChatResult<String> {
        (**self).complete(message).await
    }
}

/// Wraps a backend and folds every failure into a fallback reply.
pub struct InferenceClient<B> {
    backend: B,
}

impl<B: InferenceBackend> InferenceClient<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn reply(&self, message: &str) -> ReplyOutcome {
        match self.backend.complete(message).await {
            Ok(text) => {
                debug!(chars = text.chars().count(), "inference reply received");
                ReplyOutcome::Answered(text)
            }
            Err(err) => {
                error!(error = %err, "inference request failed");
                ReplyOutcome::Failed(TRANSPORT_FAILURE_REPLY.to_string())
            }
        }
    }
}
