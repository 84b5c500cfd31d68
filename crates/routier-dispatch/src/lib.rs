// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Streaming dispatch engine for the Routier query router.
//!
//! This crate provides [`Dispatcher`], which takes a free-text query
//! through the full pipeline: intent classification, argument extraction,
//! tool execution, and chunked answer delivery. Transports consume one of
//! two entry points: [`Dispatcher::respond`] drains the answer for
//! request/response callers, [`Dispatcher::dispatch`] yields the chunk
//! sequence for streaming callers.

mod render;

pub mod dispatcher;

pub use dispatcher::{AnswerChunkStream, DispatchOutcome, Dispatcher, RoutedReply};
