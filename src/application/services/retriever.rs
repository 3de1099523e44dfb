use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

use crate::domain::{
    ports::{EmbeddingService, Retriever, VectorStore},
    DocumentChunk, DomainError, SearchResult,
};

/// Retrieval capability derived from a vector store: embeds the query and
/// returns the nearest chunks.
pub struct VectorStoreRetriever {
    embedding: Arc<dyn EmbeddingService>,
    vector_store: Arc<dyn VectorStore>,
    top_k: usize,
}

impl VectorStoreRetriever {
    pub fn new(
        embedding: Arc<dyn EmbeddingService>,
        vector_store: Arc<dyn VectorStore>,
        top_k: usize,
    ) -> Self {
        Self {
            embedding,
            vector_store,
            top_k,
        }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    #[instrument(skip(self))]
    pub async fn retrieve_top_k(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, DomainError> {
        let embedding = self.embedding.embed(query).await?;
        self.vector_store.search(&embedding, top_k).await
    }

    #[instrument(skip(self, chunk), fields(chunk_id = %chunk.id))]
    pub async fn index_chunk(&self, chunk: &DocumentChunk) -> Result<(), DomainError> {
        let embedding = self.embedding.embed(&chunk.content).await?;
        self.vector_store.upsert(chunk, &embedding).await
    }

    #[instrument(skip(self, chunks), fields(count = chunks.len()))]
    pub async fn index_chunks(&self, chunks: &[DocumentChunk]) -> Result<(), DomainError> {
        if chunks.is_empty() {
            return Ok(());
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        let embeddings = self.embedding.embed_batch(&texts).await?;
        if embeddings.len() != chunks.len() {
            return Err(DomainError::external(format!(
                "expected {} embeddings, provider returned {}",
                chunks.len(),
                embeddings.len()
            )));
        }

        let items: Vec<_> = chunks.iter().cloned().zip(embeddings).collect();
        self.vector_store.upsert_many(&items).await
    }

    #[instrument(skip(self))]
    pub async fn delete_document(&self, document_id: uuid::Uuid) -> Result<(), DomainError> {
        self.vector_store.delete_by_document(document_id).await
    }
}

#[async_trait]
impl Retriever for VectorStoreRetriever {
    async fn retrieve(&self, query: &str) -> Result<Vec<SearchResult>, DomainError> {
        self.retrieve_top_k(query, self.top_k).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::KeywordEmbedding;
    use crate::infrastructure::InMemoryVectorStore;
    use uuid::Uuid;

    fn retriever(top_k: usize) -> VectorStoreRetriever {
        VectorStoreRetriever::new(
            Arc::new(KeywordEmbedding::new(&["return", "electronics", "shipping"])),
            Arc::new(InMemoryVectorStore::new()),
            top_k,
        )
    }

    #[tokio::test]
    async fn test_retrieve_ranks_matching_chunk_first() {
        let retriever = retriever(2);
        let doc_id = Uuid::new_v4();
        retriever
            .index_chunks(&[
                DocumentChunk::new(doc_id, "Free shipping over $50.", 0),
                DocumentChunk::new(doc_id, "You may return items within 30 days.", 1),
                DocumentChunk::new(doc_id, "Electronics carry a one year warranty.", 2),
            ])
            .await
            .unwrap();

        let results = retriever.retrieve("what is the return window").await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].chunk.chunk_index, 1);
    }

    #[tokio::test]
    async fn test_delete_document_removes_chunks() {
        let retriever = retriever(5);
        let doc_id = Uuid::new_v4();
        retriever
            .index_chunk(&DocumentChunk::new(doc_id, "return policy", 0))
            .await
            .unwrap();

        retriever.delete_document(doc_id).await.unwrap();

        assert!(retriever.retrieve("return").await.unwrap().is_empty());
    }
}
