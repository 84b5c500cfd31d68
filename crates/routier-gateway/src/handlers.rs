// SPDX-FileCopyrightText: 2026 Routier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request handlers for the HTTP endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use routier_core::ToolKind;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::server::GatewayState;

/// Body of `POST /query`.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

/// Reply for `POST /query`. Also doubles as the status frame sent at the
/// start of every WebSocket answer, with an empty `result`.
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub query: String,
    pub tool_used: ToolKind,
    pub result: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Classifies the query, runs the matching tool, and returns the full
/// answer in one response. Math expressions that fail to evaluate come
/// back as 400 with the error text in `result`.
pub async fn post_query(
    State(state): State<GatewayState>,
    Json(request): Json<QueryRequest>,
) -> Response {
    debug!(query = %request.query, "http query received");
    let reply = state.dispatcher.respond(&request.query).await;

    let (status, result) = match reply.result {
        Ok(result) => (StatusCode::OK, result),
        Err(err) => (StatusCode::BAD_REQUEST, err.to_string()),
    };

    let body = QueryResponse {
        query: request.query,
        tool_used: reply.tool,
        result,
    };
    (status, Json(body)).into_response()
}

pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_request_deserializes() {
        let request: QueryRequest =
            serde_json::from_str(r#"{"query": "what is 2 + 2"}"#).unwrap();
        assert_eq!(request.query, "what is 2 + 2");
    }

    #[test]
    fn query_response_serializes_tool_in_lowercase() {
        let response = QueryResponse {
            query: "weather in Oslo".to_string(),
            tool_used: ToolKind::Weather,
            result: "It's 24°C and sunny in Oslo. (mocked)".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["tool_used"], "weather");
        assert_eq!(json["query"], "weather in Oslo");
    }

    #[test]
    fn health_response_shape() {
        let json = serde_json::to_value(HealthResponse {
            status: "ok",
            version: "1.0.0",
        })
        .unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], "1.0.0");
    }
}
