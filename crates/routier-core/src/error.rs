// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Routier query router.

use thiserror::Error;

/// The primary error type used across all Routier crates.
#[derive(Debug, Error)]
pub enum RouterError {
    /// Configuration errors (invalid TOML, missing required fields, bad provider selection).
    #[error("configuration error: {0}")]
    Config(String),

    /// A remote collaborator could not be reached or answered with a
    /// non-success status (network failure, timeout, 5xx, rate limiting).
    #[error("{provider} unavailable: {message}")]
    RemoteUnavailable {
        provider: &'static str,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A remote collaborator responded, but the payload was missing the
    /// fields the contract promises.
    #[error("malformed {provider} response: {detail}")]
    RemoteMalformedResponse {
        provider: &'static str,
        detail: String,
    },

    /// The weather collaborator did not recognize the requested city.
    #[error("city '{city}' not found")]
    CityNotFound { city: String },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Transport-layer errors (bind failure, frame encoding).
    #[error("gateway error: {message}")]
    Gateway {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}
