// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent classification and parameter extraction.
//!
//! Pure functions over normalized (lowercased, trimmed) query text. The
//! classifier decides which tool answers a query; the extractors pull the
//! tool's argument (a city name, an arithmetic expression) out of the
//! surrounding prose. No I/O, no state.

pub mod classifier;
pub mod extract;

pub use classifier::classify;
pub use extract::{extract_city, extract_expression};
