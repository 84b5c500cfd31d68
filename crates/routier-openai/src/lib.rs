// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI generation provider adapter for the Routier query router.
//!
//! This crate implements [`GenerationProvider`] twice: [`OpenAiGeneration`]
//! talks to the live chat-completions API (single-shot and SSE streaming),
//! [`MockGeneration`] answers with a clearly-labeled canned response for
//! deployments without credentials. Which one serves a running router is
//! decided once at startup.

pub mod client;
pub mod sse;
pub mod types;

use async_trait::async_trait;
use routier_core::{GenerationProvider, RouterError, TextDeltaStream};
use tracing::info;

use crate::client::OpenAiClient;

/// Fragment size for the mocked stream, in characters.
const MOCK_CHUNK_CHARS: usize = 20;

/// Live generation strategy backed by the OpenAI chat-completions API.
pub struct OpenAiGeneration {
    client: OpenAiClient,
}

impl OpenAiGeneration {
    /// Creates the live strategy.
    pub fn new(
        api_key: String,
        model: String,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<Self, RouterError> {
        let client = OpenAiClient::new(api_key, model.clone(), temperature, max_tokens)?;
        info!(model, "openai provider initialized");
        Ok(Self { client })
    }
}

#[async_trait]
impl GenerationProvider for OpenAiGeneration {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, prompt: &str) -> Result<String, RouterError> {
        self.client.complete_chat(prompt).await
    }

    async fn stream(&self, prompt: &str) -> Result<TextDeltaStream, RouterError> {
        self.client.stream_chat(prompt).await
    }
}

/// Fallback strategy producing a canned answer.
///
/// The streaming form chunks the canned text into small fragments so the
/// transport contract looks the same as a live stream.
pub struct MockGeneration;

#[async_trait]
impl GenerationProvider for MockGeneration {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn complete(&self, prompt: &str) -> Result<String, RouterError> {
        Ok(format!(
            "[mocked generation] You asked: '{prompt}'. No generation API key is configured."
        ))
    }

    async fn stream(&self, prompt: &str) -> Result<TextDeltaStream, RouterError> {
        let text = self.complete(prompt).await?;
        let fragments = chunk_text(&text, MOCK_CHUNK_CHARS);
        Ok(Box::pin(futures::stream::iter(
            fragments.into_iter().map(Ok),
        )))
    }
}

/// Splits text into fragments of at most `chars_per_chunk` characters.
///
/// Counts characters rather than bytes so multi-byte input never splits
/// inside a code point.
fn chunk_text(text: &str, chars_per_chunk: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0;

    for ch in text.chars() {
        current.push(ch);
        count += 1;
        if count == chars_per_chunk {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
