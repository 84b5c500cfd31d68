// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Routier workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifies which tool answers a query.
///
/// Exactly one value is chosen per query; classification is total and
/// defaults to [`ToolKind::Generation`]. The lowercase names are the wire
/// representation in the `tool_used` response field.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    Weather,
    Math,
    Generation,
}

/// One unit of dispatched answer output.
///
/// Every dispatch yields zero or more `Fragment`s followed by exactly one
/// `End`. Receivers treat the arrival of `End`, not connection closure, as
/// completion, because a connection may be reused for further queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerChunk {
    /// A piece of answer text, forwarded in arrival order.
    Fragment(String),
    /// Terminal marker. Nothing follows it for the same query.
    End,
}

/// Wire rendering of [`AnswerChunk::End`] on text-frame transports.
///
/// Reserved: never part of a real answer fragment.
pub const END_FRAME: &str = "[END]";

/// A current-conditions report returned by a weather strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// City name as reported by the provider (or as requested, for mocks).
    pub city: String,
    /// Temperature in degrees Celsius.
    pub temperature_c: f64,
    /// Short conditions description, lowercase as providers return it.
    pub description: String,
    /// True when the report came from the fallback strategy.
    pub mocked: bool,
}
