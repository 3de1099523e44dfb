use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::routes::{chat::ContextDocument, status_for};
use crate::api::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateDocumentRequest {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct CreateDocumentResponse {
    pub document_id: Uuid,
    pub name: String,
    pub chunks: usize,
}

#[derive(Debug, Deserialize)]
pub struct SearchDocumentsRequest {
    pub query: String,
    pub limit: Option<usize>,
}

pub async fn create_document(
    State(state): State<AppState>,
    Json(request): Json<CreateDocumentRequest>,
) -> Result<(StatusCode, Json<CreateDocumentResponse>), StatusCode> {
    let (doc, chunks) = state
        .document_service
        .ingest(&request.name, &request.content)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, name = %request.name, "failed to ingest document");
            status_for(&e)
        })?;

    Ok((
        StatusCode::CREATED,
        Json(CreateDocumentResponse {
            document_id: doc.id,
            name: doc.name,
            chunks: chunks.len(),
        }),
    ))
}

pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    state.document_service.delete(id).await.map_err(|e| {
        tracing::error!(error = %e, document_id = %id, "failed to delete document");
        status_for(&e)
    })?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn search_documents(
    State(state): State<AppState>,
    Json(request): Json<SearchDocumentsRequest>,
) -> Result<Json<Vec<ContextDocument>>, StatusCode> {
    let top_k = request.limit.unwrap_or_else(|| state.retriever.top_k());
    let results = state
        .retriever
        .retrieve_top_k(&request.query, top_k)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "search failed");
            status_for(&e)
        })?;

    Ok(Json(results.into_iter().map(ContextDocument::from).collect()))
}
