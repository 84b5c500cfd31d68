// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Streaming query endpoint.
//!
//! Each text frame received on `/ws` is a complete query. The answer
//! goes back as a JSON status frame naming the tool, then one text
//! frame per fragment, then the literal `[END]` marker. Queries on one
//! connection are answered strictly in order; frames from different
//! answers never interleave.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures::StreamExt;
use routier_core::{AnswerChunk, END_FRAME};
use tracing::{debug, info};

use crate::handlers::QueryResponse;
use crate::server::GatewayState;

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<GatewayState>) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: GatewayState) {
    info!("websocket client connected");

    while let Some(Ok(message)) = socket.recv().await {
        match message {
            Message::Text(text) => {
                if stream_answer(&mut socket, &state, text.as_str())
                    .await
                    .is_err()
                {
                    // Peer went away mid-answer. The remaining fragments
                    // are dropped without an end marker.
                    debug!("websocket send failed, abandoning answer");
                    break;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    info!("websocket client disconnected");
}

/// Runs one query and writes the full frame sequence for its answer.
async fn stream_answer(
    socket: &mut WebSocket,
    state: &GatewayState,
    query: &str,
) -> Result<(), axum::Error> {
    debug!(query = %query, "websocket query received");
    let outcome = state.dispatcher.dispatch(query).await;

    let status = QueryResponse {
        query: query.to_string(),
        tool_used: outcome.tool,
        result: String::new(),
    };
    let status_json = serde_json::to_string(&status).map_err(axum::Error::new)?;
    socket.send(Message::Text(status_json.into())).await?;

    let mut chunks = outcome.chunks;
    while let Some(chunk) = chunks.next().await {
        let frame = match chunk {
            AnswerChunk::Fragment(text) => Message::Text(text.into()),
            AnswerChunk::End => Message::Text(END_FRAME.into()),
        };
        socket.send(frame).await?;
    }

    Ok(())
}
