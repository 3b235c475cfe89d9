//! Request shapes for the messages relay
//!
//! `InboundRequest` is what callers post; `OutboundRequest` is what Bedrock
//! receives. Both live only for the duration of one call.
//!
//! Validation belongs to Bedrock: a field that does not fit its expected
//! shape is carried as raw JSON and forwarded unchanged, so the caller gets
//! the provider's own `ValidationException` rather than a local parse error.

use serde::{Deserialize, Serialize};

use crate::config::RelayConfig;

/// A field that is either its expected type or whatever JSON the caller sent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Lenient<T> {
    Valid(T),
    Raw(serde_json::Value),
}

impl<T> Lenient<T> {
    pub fn valid(&self) -> Option<&T> {
        match self {
            Lenient::Valid(v) => Some(v),
            Lenient::Raw(_) => None,
        }
    }
}

impl<T> From<T> for Lenient<T> {
    fn from(value: T) -> Self {
        Lenient::Valid(value)
    }
}

/// One entry of the conversation.
///
/// `content` is kept as raw JSON because Anthropic accepts either a plain
/// string or a list of content blocks. Any other keys ride along in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ChatMessage {
    fn text(role: &str, content: &str) -> Self {
        Self {
            role: role.to_string(),
            content: Some(serde_json::Value::String(content.to_string())),
            extra: serde_json::Map::new(),
        }
    }

    pub fn user(content: &str) -> Self {
        Self::text("user", content)
    }

    pub fn assistant(content: &str) -> Self {
        Self::text("assistant", content)
    }
}

/// Caller payload. Nothing is mandatory and unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InboundRequest {
    #[serde(default)]
    pub messages: Option<Lenient<Vec<ChatMessage>>>,
    #[serde(default)]
    pub max_tokens: Option<Lenient<u32>>,
    #[serde(default)]
    pub temperature: Option<Lenient<f64>>,
}

/// Bedrock payload. Every field is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundRequest {
    pub anthropic_version: String,
    pub max_tokens: Lenient<u32>,
    pub messages: Lenient<Vec<ChatMessage>>,
    pub temperature: Lenient<f64>,
}

impl InboundRequest {
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(body)
    }

    /// Fill defaults from `config` and stamp the protocol version
    pub fn into_outbound(self, config: &RelayConfig) -> OutboundRequest {
        OutboundRequest {
            anthropic_version: config.anthropic_version.clone(),
            max_tokens: self
                .max_tokens
                .unwrap_or(Lenient::Valid(config.default_max_tokens)),
            messages: self.messages.unwrap_or(Lenient::Valid(Vec::new())),
            temperature: self
                .temperature
                .unwrap_or(Lenient::Valid(config.default_temperature)),
        }
    }
}

impl OutboundRequest {
    pub fn to_bytes(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn outbound(json: &str) -> OutboundRequest {
        InboundRequest::from_slice(json.as_bytes())
            .unwrap()
            .into_outbound(&RelayConfig::default())
    }

    fn wire(json: &str) -> serde_json::Value {
        serde_json::from_slice(&outbound(json).to_bytes().unwrap()).unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let out = outbound(r#"{"messages": [{"role": "user", "content": "hi"}]}"#);
        assert_eq!(out.anthropic_version, "bedrock-2023-05-31");
        assert_eq!(out.max_tokens, Lenient::Valid(2048));
        assert_eq!(out.temperature, Lenient::Valid(0.7));
        assert_eq!(out.messages, Lenient::Valid(vec![ChatMessage::user("hi")]));
    }

    #[test]
    fn test_supplied_values_kept() {
        let out = outbound(r#"{"messages": [], "max_tokens": 100, "temperature": 0.2}"#);
        assert_eq!(out.max_tokens.valid(), Some(&100));
        assert_eq!(out.temperature.valid(), Some(&0.2));
    }

    #[test]
    fn test_missing_messages_is_empty() {
        let out = outbound(r#"{"max_tokens": 10}"#);
        assert_eq!(out.messages, Lenient::Valid(Vec::new()));
        assert_eq!(out.max_tokens.valid(), Some(&10));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let value = wire(r#"{"model": "gpt-4", "stream": true, "top_p": 0.9}"#);
        assert_eq!(value["messages"], json!([]));
        assert_eq!(value["max_tokens"], 2048);
        assert!(value.get("model").is_none());
        assert!(value.get("stream").is_none());
    }

    #[test]
    fn test_null_optionals_use_defaults() {
        let out = outbound(r#"{"max_tokens": null, "temperature": null}"#);
        assert_eq!(out.max_tokens, Lenient::Valid(2048));
        assert_eq!(out.temperature, Lenient::Valid(0.7));
    }

    #[test]
    fn test_content_blocks_preserved() {
        let value = wire(r#"{"messages": [{"role": "user", "content": [{"type": "text", "text": "hello"}]}]}"#);
        assert_eq!(
            value["messages"][0]["content"],
            json!([{"type": "text", "text": "hello"}])
        );
    }

    #[test]
    fn test_message_extra_keys_forwarded() {
        let value = wire(
            r#"{"messages": [{"role": "user", "content": "hi", "cache_control": {"type": "ephemeral"}}]}"#,
        );
        assert_eq!(
            value["messages"][0],
            json!({"role": "user", "content": "hi", "cache_control": {"type": "ephemeral"}})
        );
    }

    #[test]
    fn test_message_without_content_forwarded() {
        let value = wire(r#"{"messages": [{"role": "user"}]}"#);
        assert_eq!(value["messages"], json!([{"role": "user"}]));
    }

    #[test]
    fn test_fractional_max_tokens_forwarded() {
        let out = outbound(r#"{"max_tokens": 1024.0}"#);
        assert!(out.max_tokens.valid().is_none());
        assert_eq!(wire(r#"{"max_tokens": 1024.0}"#)["max_tokens"], 1024.0);
    }

    #[test]
    fn test_non_list_messages_forwarded() {
        let out = outbound(r#"{"messages": "hi"}"#);
        assert_eq!(out.messages, Lenient::Raw(json!("hi")));
        assert_eq!(wire(r#"{"messages": "hi"}"#)["messages"], "hi");
    }

    #[test]
    fn test_message_order_preserved() {
        let out = outbound(
            r#"{"messages": [
                {"role": "user", "content": "one"},
                {"role": "assistant", "content": "two"},
                {"role": "user", "content": "three"}
            ]}"#,
        );
        assert_eq!(
            out.messages,
            Lenient::Valid(vec![
                ChatMessage::user("one"),
                ChatMessage::assistant("two"),
                ChatMessage::user("three"),
            ])
        );
    }

    #[test]
    fn test_malformed_body_rejected() {
        assert!(InboundRequest::from_slice(b"not json").is_err());
    }

    #[test]
    fn test_outbound_wire_shape() {
        let value = wire(r#"{"messages": [{"role": "user", "content": "hi"}]}"#);
        assert_eq!(value["anthropic_version"], "bedrock-2023-05-31");
        assert_eq!(value["max_tokens"], 2048);
        assert_eq!(value["temperature"], 0.7);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hi");
    }

    #[test]
    fn test_outbound_roundtrip() {
        let original = OutboundRequest {
            anthropic_version: "bedrock-2023-05-31".to_string(),
            max_tokens: 512.into(),
            messages: vec![ChatMessage::user("ping"), ChatMessage::assistant("pong")].into(),
            temperature: 0.35.into(),
        };
        let parsed: OutboundRequest = serde_json::from_slice(&original.to_bytes().unwrap()).unwrap();
        assert_eq!(parsed, original);
    }
}
