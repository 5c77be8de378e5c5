//! JSON bodies exchanged with the assistant backend.
//!
//! ```text
//! GET  /health  → HealthResponse
//! POST /chat    ChatRequest → ChatResponse
//! GET  /        → ServiceInfo
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::turn::MessageText;

/// Body of `POST /chat`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    /// The user's message.
    pub message: String,
}

impl ChatRequest {
    /// Build a request from validated user text.
    pub fn new(text: &MessageText) -> Self {
        Self {
            message: text.as_str().to_string(),
        }
    }
}

/// Successful response of `POST /chat`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatResponse {
    /// The assistant's reply.
    pub response: String,
}

/// Response of `GET /health`.
///
/// Clients only look at the status code; the body is informative.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthResponse {
    /// Health label (e.g. `"healthy"`).
    pub status: String,
    /// Name of the answering service.
    pub service: String,
}

/// Response of `GET /`, describing the service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ServiceInfo {
    /// Human-readable service name.
    pub name: String,
    /// Run status label.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Route → description.
    pub endpoints: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_wire_shape() {
        let text = MessageText::parse("who is leading?").unwrap();
        let json = serde_json::to_value(ChatRequest::new(&text)).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "who is leading?" }));
    }

    #[test]
    fn chat_response_requires_response_field() {
        let ok: ChatResponse =
            serde_json::from_str(r#"{"response":"Driver A"}"#).unwrap();
        assert_eq!(ok.response, "Driver A");
        assert!(serde_json::from_str::<ChatResponse>(r#"{"answer":"Driver A"}"#).is_err());
        assert!(serde_json::from_str::<ChatResponse>(r#"{"response":42}"#).is_err());
    }

    #[test]
    fn chat_response_ignores_extra_fields() {
        let ok: ChatResponse =
            serde_json::from_str(r#"{"response":"Box","latency_ms":12}"#).unwrap();
        assert_eq!(ok.response, "Box");
    }
}
