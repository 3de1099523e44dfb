use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::routes::status_for;
use crate::api::state::AppState;
use crate::application::{SessionConfig, DEFAULT_SESSION_ID};
use crate::domain::{Message, SearchResult};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub input: String,
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub answer: String,
    pub context: Vec<ContextDocument>,
}

#[derive(Debug, Serialize)]
pub struct ContextDocument {
    pub chunk_id: Uuid,
    pub document_id: Uuid,
    pub content: String,
    pub source: Option<String>,
    pub score: f32,
}

impl From<SearchResult> for ContextDocument {
    fn from(result: SearchResult) -> Self {
        Self {
            chunk_id: result.chunk.id,
            document_id: result.chunk.document_id,
            content: result.chunk.content,
            source: result.chunk.metadata.source,
            score: result.score,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub session_id: String,
    pub turns: usize,
    pub messages: Vec<Message>,
}

pub async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, StatusCode> {
    let session_id = request
        .session_id
        .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());
    let config = SessionConfig::new(session_id);

    let output = state
        .chain
        .invoke(&request.input, &config)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, session_id = %config.session_id, "chat failed");
            status_for(&e)
        })?;

    Ok(Json(ChatResponse {
        session_id: config.session_id,
        answer: output.answer,
        context: output.context.into_iter().map(ContextDocument::from).collect(),
    }))
}

pub async fn get_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<HistoryResponse>, StatusCode> {
    let history = state
        .chain
        .histories()
        .find(&session_id)
        .ok_or(StatusCode::NOT_FOUND)?;
    let log = history.lock().await;

    Ok(Json(HistoryResponse {
        session_id,
        turns: log.turn_count(),
        messages: log.messages().to_vec(),
    }))
}
