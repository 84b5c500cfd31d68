// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI chat-completions API.
//!
//! Provides [`OpenAiClient`] which handles request construction,
//! authentication, streaming SSE responses, and transient error retry.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use routier_core::{RouterError, TextDeltaStream};
use tracing::{debug, warn};

use crate::sse;
use crate::types::{ApiErrorResponse, ChatMessage, ChatRequest, ChatResponse};

/// Base URL for the OpenAI API.
const API_BASE_URL: &str = "https://api.openai.com";

/// Request timeout for completion calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for OpenAI API communication.
///
/// Manages authentication headers, connection pooling, and retry logic
/// for transient errors (429, 500, 503).
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    model: String,
    temperature: f64,
    max_tokens: u32,
    max_retries: u32,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a new OpenAI API client.
    pub fn new(
        api_key: String,
        model: String,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<Self, RouterError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "authorization",
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                RouterError::Config(format!("invalid API key header value: {e}"))
            })?,
        );
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RouterError::RemoteUnavailable {
                provider: "openai",
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            model,
            temperature,
            max_tokens,
            max_retries: 1,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    fn chat_request(&self, prompt: &str, stream: bool) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            stream,
        }
    }

    /// Sends a non-streaming completion request and returns the answer text.
    ///
    /// On transient errors (429, 500, 503), retries once after a 1-second delay.
    pub async fn complete_chat(&self, prompt: &str) -> Result<String, RouterError> {
        let request = self.chat_request(prompt, false);
        let url = format!("{}/v1/chat/completions", self.base_url);

        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying completion request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&url)
                .json(&request)
                .send()
                .await
                .map_err(map_send_error)?;

            let status = response.status();
            debug!(status = %status, attempt, "completion response received");

            if status.is_success() {
                let body = response.text().await.map_err(|e| {
                    RouterError::RemoteUnavailable {
                        provider: "openai",
                        message: format!("failed to read response body: {e}"),
                        source: Some(Box::new(e)),
                    }
                })?;
                let parsed: ChatResponse = serde_json::from_str(&body).map_err(|e| {
                    RouterError::RemoteMalformedResponse {
                        provider: "openai",
                        detail: format!("failed to parse API response: {e}"),
                    }
                })?;
                let choice = parsed.choices.into_iter().next().ok_or_else(|| {
                    RouterError::RemoteMalformedResponse {
                        provider: "openai",
                        detail: "choices array is empty".to_string(),
                    }
                })?;
                return Ok(choice.message.content.unwrap_or_default());
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(api_error(status, &body));
                continue;
            }

            // Non-transient error or exhausted retries.
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status, &body));
        }

        Err(last_error.unwrap_or_else(|| RouterError::RemoteUnavailable {
            provider: "openai",
            message: "completion request failed after retries".to_string(),
            source: None,
        }))
    }

    /// Sends a streaming completion request and returns a stream of text deltas.
    ///
    /// On transient errors (429, 500, 503), retries once after a 1-second delay.
    pub async fn stream_chat(&self, prompt: &str) -> Result<TextDeltaStream, RouterError> {
        let request = self.chat_request(prompt, true);
        let url = format!("{}/v1/chat/completions", self.base_url);

        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying streaming request after transient error");
                tokio::time::sleep(Duration::from_secs(1)).await;
            }

            let response = self
                .client
                .post(&url)
                .json(&request)
                .send()
                .await
                .map_err(map_send_error)?;

            let status = response.status();
            debug!(status = %status, attempt, "streaming response received");

            if status.is_success() {
                return Ok(sse::parse_sse_stream(response));
            }

            if is_transient_error(status) && attempt < self.max_retries {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "transient error, will retry");
                last_error = Some(api_error(status, &body));
                continue;
            }

            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status, &body));
        }

        Err(last_error.unwrap_or_else(|| RouterError::RemoteUnavailable {
            provider: "openai",
            message: "streaming request failed after retries".to_string(),
            source: None,
        }))
    }
}

/// Maps a reqwest send failure onto the router taxonomy.
fn map_send_error(e: reqwest::Error) -> RouterError {
    if e.is_timeout() {
        RouterError::Timeout {
            duration: REQUEST_TIMEOUT,
        }
    } else {
        RouterError::RemoteUnavailable {
            provider: "openai",
            message: format!("HTTP request failed: {e}"),
            source: Some(Box::new(e)),
        }
    }
}

/// Builds the error for a non-success response, preferring the API's own
/// error envelope when the body carries one.
fn api_error(status: reqwest::StatusCode, body: &str) -> RouterError {
    let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(body) {
        format!(
            "OpenAI API error ({}): {}",
            api_err.error.type_.as_deref().unwrap_or("unknown"),
            api_err.error.message
        )
    } else {
        format!("API returned {status}: {body}")
    };
    RouterError::RemoteUnavailable {
        provider: "openai",
        message,
        source: None,
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}
