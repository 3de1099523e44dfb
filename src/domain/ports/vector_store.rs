use crate::domain::{errors::DomainError, DocumentChunk, Embedding, SearchResult};
use async_trait::async_trait;
use uuid::Uuid;

/// Storage of chunk embeddings with nearest-neighbour search.
#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn upsert(&self, chunk: &DocumentChunk, embedding: &Embedding)
        -> Result<(), DomainError>;

    async fn upsert_many(
        &self,
        items: &[(DocumentChunk, Embedding)],
    ) -> Result<(), DomainError> {
        for (chunk, embedding) in items {
            self.upsert(chunk, embedding).await?;
        }
        Ok(())
    }

    /// Highest-scoring chunks first, at most `top_k`.
    async fn search(
        &self,
        query: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, DomainError>;

    async fn delete_by_document(&self, document_id: Uuid) -> Result<(), DomainError>;
}
