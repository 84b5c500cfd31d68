// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP and WebSocket surface for the Routier query router.
//!
//! The gateway exposes three routes:
//!
//! - `POST /query` runs a query to completion and returns the full
//!   answer as JSON.
//! - `GET /ws` upgrades to a WebSocket that answers each incoming text
//!   frame with a status frame, streamed fragments, and an `[END]`
//!   marker.
//! - `GET /health` reports liveness and the crate version.
//!
//! Routing and tool execution live in `routier-dispatch`; this crate
//! only adapts them to the wire.

pub mod handlers;
pub mod server;
pub mod ws;

pub use handlers::{HealthResponse, QueryRequest, QueryResponse};
pub use server::{build_router, start_server, GatewayState, ServeOptions};
