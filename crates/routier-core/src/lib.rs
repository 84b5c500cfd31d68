// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Routier query router.
//!
//! Defines the error type, the tool identity and answer-chunk types, and
//! the strategy traits implemented by the remote-collaborator crates. All
//! other workspace crates build on this one.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::RouterError;
pub use traits::{GenerationProvider, TextDeltaStream, WeatherProvider};
pub use types::{AnswerChunk, END_FRAME, ToolKind, WeatherReport};
