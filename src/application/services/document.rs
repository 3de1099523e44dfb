use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::application::services::VectorStoreRetriever;
use crate::domain::{chunk_content, Document, DocumentChunk, DomainError};

pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Loads raw text into the vector store behind a retriever.
pub struct DocumentService {
    retriever: Arc<VectorStoreRetriever>,
    chunk_size: usize,
}

impl DocumentService {
    pub fn new(retriever: Arc<VectorStoreRetriever>) -> Self {
        Self {
            retriever,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    #[instrument(skip(self, content), fields(len = content.len()))]
    pub async fn ingest(
        &self,
        name: &str,
        content: &str,
    ) -> Result<(Document, Vec<DocumentChunk>), DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::validation("document content is empty"));
        }

        let doc = Document::new(name);
        let chunks = chunk_content(&doc, content, self.chunk_size);
        self.retriever.index_chunks(&chunks).await?;

        tracing::info!(document_id = %doc.id, chunks = chunks.len(), "document indexed");
        Ok((doc, chunks))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.retriever.delete_document(id).await
    }
}
