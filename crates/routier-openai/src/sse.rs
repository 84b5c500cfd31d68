// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SSE stream parser for OpenAI streaming completions.
//!
//! Converts a reqwest response byte stream into a stream of text deltas
//! using the `eventsource-stream` crate for SSE protocol compliance.
//! OpenAI does not name its events; every payload arrives as a `data:`
//! line holding either a JSON chunk or the `[DONE]` sentinel.

use eventsource_stream::Eventsource;
use futures::stream::StreamExt;
use routier_core::{RouterError, TextDeltaStream};

use crate::types::ChatStreamChunk;

/// What one SSE event contributes to the delta stream.
enum SseItem {
    /// A non-empty content delta.
    Delta(String),
    /// A chunk without content (role announcement, finish_reason carrier).
    Skip,
    /// The `[DONE]` sentinel; nothing follows.
    Done,
}

/// Parses a streaming completion response into a stream of text deltas.
///
/// Empty deltas are dropped, the stream ends at the `[DONE]` sentinel,
/// and transport or parse failures surface as `Err` items.
pub fn parse_sse_stream(response: reqwest::Response) -> TextDeltaStream {
    let event_stream = response.bytes_stream().eventsource();

    let deltas = event_stream
        .map(|result| match result {
            Ok(event) => {
                if event.data.trim() == "[DONE]" {
                    return Ok(SseItem::Done);
                }
                let chunk: ChatStreamChunk = serde_json::from_str(&event.data).map_err(|e| {
                    RouterError::RemoteMalformedResponse {
                        provider: "openai",
                        detail: format!("failed to parse stream chunk: {e}"),
                    }
                })?;
                let content = chunk
                    .choices
                    .into_iter()
                    .next()
                    .and_then(|choice| choice.delta.content)
                    .filter(|text| !text.is_empty());
                Ok(content.map_or(SseItem::Skip, SseItem::Delta))
            }
            Err(e) => Err(RouterError::RemoteUnavailable {
                provider: "openai",
                message: format!("SSE stream error: {e}"),
                source: None,
            }),
        })
        .take_while(|item| {
            let done = matches!(item, Ok(SseItem::Done));
            async move { !done }
        })
        .filter_map(|item| async move {
            match item {
                Ok(SseItem::Delta(text)) => Some(Ok(text)),
                Ok(SseItem::Skip) | Ok(SseItem::Done) => None,
                Err(e) => Some(Err(e)),
            }
        });

    Box::pin(deltas)
}
