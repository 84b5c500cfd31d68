// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text-generation collaborator strategy trait.

use std::pin::Pin;

use async_trait::async_trait;
use futures_core::Stream;

use crate::error::RouterError;

/// A lazily produced, ordered, finite sequence of text deltas.
pub type TextDeltaStream = Pin<Box<dyn Stream<Item = Result<String, RouterError>> + Send>>;

/// Strategy for free-text generation.
///
/// Implemented by the live OpenAI-compatible client and by the mocked
/// fallback used when no API key is configured. Both support single-shot
/// completion and delta streaming so the dispatch engine's contract does
/// not depend on which strategy is active.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Strategy name for logs.
    fn name(&self) -> &'static str;

    /// Produce the complete answer in one call.
    async fn complete(&self, prompt: &str) -> Result<String, RouterError>;

    /// Produce the answer as a stream of text deltas in arrival order.
    async fn stream(&self, prompt: &str) -> Result<TextDeltaStream, RouterError>;
}
