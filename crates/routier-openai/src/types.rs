// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request and response types for the OpenAI chat-completions API.

use serde::{Deserialize, Serialize};

/// POST body for `/v1/chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
    pub stream: bool,
}

/// A single conversation turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Non-streaming completion response, reduced to the fields the router
/// consumes.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    /// `null` for tool-call turns; rendered as the empty string.
    #[serde(default)]
    pub content: Option<String>,
}

/// One SSE `data:` payload of a streaming completion.
#[derive(Debug, Deserialize)]
pub struct ChatStreamChunk {
    pub choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
pub struct StreamChoice {
    #[serde(default)]
    pub delta: StreamDelta,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Incremental content. The first chunk of a stream usually carries only
/// the role and no content.
#[derive(Debug, Default, Deserialize)]
pub struct StreamDelta {
    #[serde(default)]
    pub content: Option<String>,
}

/// Error envelope returned by the API on non-success statuses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(default, rename = "type")]
    pub type_: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_serializes_expected_shape() {
        let request = ChatRequest {
            model: "gpt-4o-mini".into(),
            messages: vec![ChatMessage {
                role: "user".into(),
                content: "Hello".into(),
            }],
            temperature: 0.2,
            max_tokens: 512,
            stream: false,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "Hello");
        assert_eq!(value["temperature"], 0.2);
        assert_eq!(value["max_tokens"], 512);
        assert_eq!(value["stream"], false);
    }

    #[test]
    fn null_content_deserializes_as_none() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":null},"finish_reason":"stop"}]}"#,
        )
        .unwrap();
        assert!(response.choices[0].message.content.is_none());
    }

    #[test]
    fn role_only_stream_chunk_has_no_content() {
        let chunk: ChatStreamChunk = serde_json::from_str(
            r#"{"choices":[{"delta":{"role":"assistant"},"finish_reason":null}]}"#,
        )
        .unwrap();
        assert!(chunk.choices[0].delta.content.is_none());
    }

    #[test]
    fn api_error_envelope_deserializes() {
        let parsed: ApiErrorResponse = serde_json::from_str(
            r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","param":null,"code":"invalid_api_key"}}"#,
        )
        .unwrap();
        assert_eq!(parsed.error.type_.as_deref(), Some("invalid_request_error"));
        assert!(parsed.error.message.contains("Incorrect API key"));
    }
}
