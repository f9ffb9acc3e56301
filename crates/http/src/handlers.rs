//! axum handlers for the generic fuzzy-search endpoints (spec §6): `GET
//! /api/busca` and the streaming `GET /api/busca/ws`.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use crate::config::{resolve_limit, SearchConfig};
use crate::error::RequestError;
use crate::orchestrator::{run_search, to_wire, SearchSource};
use crate::wire::SearchResult;

/// Shared handler state: every registered corpus plus the active search config.
#[derive(Clone)]
pub struct SearchState {
    pub sources: Arc<Vec<Arc<dyn SearchSource>>>,
    pub config: Arc<SearchConfig>,
}

#[derive(Debug, Deserialize)]
pub struct BuscaQuery {
    query: String,
    limit: Option<String>,
}

async fn search_all(state: &SearchState, query: &str, limit_raw: Option<&str>) -> Result<Vec<SearchResult>, RequestError> {
    let limit = resolve_limit(limit_raw, &state.config)?;
    if limit == 0 {
        return Ok(Vec::new());
    }
    let hits = run_search(
        &state.sources,
        query,
        limit as usize,
        state.config.max_result_score,
        state.config.send_hidden_fields,
    )
    .await;
    Ok(to_wire(hits, state.config.send_score))
}

/// `GET /api/busca?query=...&limit=...`.
pub async fn busca(
    State(state): State<SearchState>,
    Query(params): Query<BuscaQuery>,
) -> Result<Json<Vec<SearchResult>>, RequestError> {
    let results = search_all(&state, &params.query, params.limit.as_deref()).await?;
    Ok(Json(results))
}

/// `GET /api/busca/ws`: each inbound text frame is a new query; each reply
/// is the JSON-encoded result array, or `"[]"` if encoding somehow fails
/// (spec §4.9).
pub async fn busca_ws(ws: WebSocketUpgrade, State(state): State<SearchState>) -> Response {
    ws.on_upgrade(move |socket| handle_busca_socket(socket, state))
}

async fn handle_busca_socket(mut socket: WebSocket, state: SearchState) {
    while let Some(Ok(message)) = socket.recv().await {
        let Message::Text(query) = message else { continue };
        let results = match search_all(&state, &query, None).await {
            Ok(results) => results,
            Err(_) => Vec::new(),
        };
        let payload = serde_json::to_string(&results).unwrap_or_else(|err| {
            debug!(error = %err, "failed to encode search results, degrading to empty array");
            "[]".to_string()
        });
        if socket.send(Message::Text(payload.into())).await.is_err() {
            break;
        }
    }
}
