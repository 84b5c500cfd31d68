// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Strategy traits for the two remote collaborators.
//!
//! Each remote collaborator has one trait with a live implementation and a
//! mocked fallback implementation; the concrete strategy is selected once
//! at startup, so the dispatch engine never branches on configuration.

pub mod generation;
pub mod weather;

pub use generation::{GenerationProvider, TextDeltaStream};
pub use weather::WeatherProvider;
