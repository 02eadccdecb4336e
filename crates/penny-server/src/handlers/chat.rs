//! Chat handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::AppState;
use penny_core::QueryEngine;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// POST /api/chat - Answer a spending question
///
/// Always succeeds; failures are part of the reply text.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Json<ChatResponse> {
    debug!(chars = req.message.len(), "Chat message received");
    let response = QueryEngine::new(&state.db).resolve(&req.message);
    Json(ChatResponse { response })
}
