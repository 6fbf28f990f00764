use super::{ChatError, ChatResult, InferenceBackend};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Bot text used when the webhook answers with JSON we cannot read a reply from.
pub const UNUSABLE_REPLY: &str = "Maaf, saya tidak dapat memproses permintaan Anda.";

pub struct WebhookBackend {
    client: Client,
    endpoint: String,
}

impl WebhookBackend {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> ChatResult<Self> {
        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return Err(ChatError::Config("endpoint URL is empty".to_string()));
        }
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[derive(Serialize)]
struct WebhookRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReplyFields {
    #[serde(default)]
    output: Option<Value>,
    #[serde(default)]
    response: Option<Value>,
    #[serde(default)]
    message: Option<Value>,
}

/// The payload shapes the webhook is known to answer with.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ReplyShape {
    /// `[{ "output": "..." }, ...]`; only the first element counts.
    Batch(Vec<Value>),
    /// `{ "output" | "response" | "message": "..." }`, checked in that order.
    Fields(ReplyFields),
    Other(Value),
}

fn usable(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(text)) if !text.is_empty() => Some(text.clone()),
        _ => None,
    }
}

impl ReplyShape {
    pub fn bot_text(&self) -> Option<String> {
        match self {
            ReplyShape::Batch(items) => usable(items.first().and_then(|item| item.get("output"))),
            ReplyShape::Fields(fields) => usable(fields.output.as_ref())
                .or_else(|| usable(fields.response.as_ref()))
                .or_else(|| usable(fields.message.as_ref())),
            ReplyShape::Other(_) => None,
        }
    }

    pub fn into_text(self) -> String {
        self.bot_text()
            .unwrap_or_else(|| UNUSABLE_REPLY.to_string())
    }
}

/// Decode a webhook body. A body that is not JSON at all is an error; JSON in
/// an unexpected shape resolves to the fallback reply.
pub fn decode_reply(body: &str) -> ChatResult<String> {
    let shape: ReplyShape = serde_json::from_str(body)?;
    Ok(shape.into_text())
}

#[async_trait]
impl InferenceBackend for WebhookBackend {
    async fn complete(&self, message: &str) -> ChatResult<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&WebhookRequest { message })
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            // The body is still decoded: error payloads often carry a `message`.
            warn!(%status, "inference endpoint returned a non-success status");
        }
        debug!(%status, bytes = body.len(), "inference endpoint answered");
        decode_reply(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_uses_first_output() {
        assert_eq!(
            decode_reply(r#"[{"output":"pertama"},{"output":"kedua"}]"#).unwrap(),
            "pertama"
        );
    }

    #[test]
    fn batch_without_output_falls_back() {
        assert_eq!(decode_reply(r#"[{"response":"x"}]"#).unwrap(), UNUSABLE_REPLY);
        assert_eq!(decode_reply("[]").unwrap(), UNUSABLE_REPLY);
        assert_eq!(decode_reply(r#"["teks"]"#).unwrap(), UNUSABLE_REPLY);
    }

    #[test]
    fn object_field_priority() {
        assert_eq!(
            decode_reply(r#"{"message":"m","response":"r","output":"o"}"#).unwrap(),
            "o"
        );
        assert_eq!(decode_reply(r#"{"message":"m","response":"r"}"#).unwrap(), "r");
        assert_eq!(decode_reply(r#"{"message":"m"}"#).unwrap(), "m");
    }

    #[test]
    fn empty_or_non_string_fields_are_skipped() {
        assert_eq!(
            decode_reply(r#"{"output":"","response":"cadangan"}"#).unwrap(),
            "cadangan"
        );
        assert_eq!(decode_reply(r#"{"output":42}"#).unwrap(), UNUSABLE_REPLY);
        assert_eq!(decode_reply(r#"{"lain":"x"}"#).unwrap(), UNUSABLE_REPLY);
    }

    #[test]
    fn scalar_json_falls_back() {
        assert_eq!(decode_reply(r#""hanya teks""#).unwrap(), UNUSABLE_REPLY);
        assert_eq!(decode_reply("null").unwrap(), UNUSABLE_REPLY);
    }

    #[test]
    fn non_json_is_an_error() {
        assert!(matches!(
            decode_reply("<html>502</html>"),
            Err(ChatError::Decode(_))
        ));
    }

    #[test]
    fn empty_endpoint_is_rejected() {
        assert!(matches!(
            WebhookBackend::new("  ", None),
            Err(ChatError::Config(_))
        ));
    }
}
