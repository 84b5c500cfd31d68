// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Router construction and server lifecycle.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use routier_core::RouterError;
use routier_dispatch::Dispatcher;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{handlers, ws};

/// Bind address for the gateway. Mirrors `ServerConfig` from
/// `routier-config` so this crate does not depend on the config stack.
#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub host: String,
    pub port: u16,
}

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct GatewayState {
    pub dispatcher: Arc<Dispatcher>,
}

/// Builds the gateway router with all routes and middleware attached.
pub fn build_router(dispatcher: Arc<Dispatcher>) -> Router {
    let state = GatewayState { dispatcher };

    Router::new()
        .route("/query", post(handlers::post_query))
        .route("/health", get(handlers::get_health))
        .route("/ws", get(ws::ws_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Binds the listener and serves until the cancellation token fires.
pub async fn start_server(
    options: &ServeOptions,
    dispatcher: Arc<Dispatcher>,
    shutdown: CancellationToken,
) -> Result<(), RouterError> {
    let app = build_router(dispatcher);
    let addr = format!("{}:{}", options.host, options.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|err| RouterError::Gateway {
            message: format!("failed to bind to {addr}: {err}"),
            source: Some(Box::new(err)),
        })?;

    info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|err| RouterError::Gateway {
            message: format!("server error: {err}"),
            source: Some(Box::new(err)),
        })?;

    info!("gateway shut down");
    Ok(())
}
