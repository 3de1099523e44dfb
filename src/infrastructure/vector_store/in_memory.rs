use async_trait::async_trait;
use std::sync::RwLock;
use uuid::Uuid;

use crate::domain::{ports::VectorStore, DocumentChunk, DomainError, Embedding, SearchResult};

/// Brute-force cosine search over chunks held in memory.
#[derive(Default)]
pub struct InMemoryVectorStore {
    chunks: RwLock<Vec<(DocumentChunk, Embedding)>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.chunks.read().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn upsert(
        &self,
        chunk: &DocumentChunk,
        embedding: &Embedding,
    ) -> Result<(), DomainError> {
        self.upsert_many(&[(chunk.clone(), embedding.clone())]).await
    }

    async fn upsert_many(
        &self,
        items: &[(DocumentChunk, Embedding)],
    ) -> Result<(), DomainError> {
        let mut store = self
            .chunks
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        for (chunk, embedding) in items {
            store.retain(|(c, _)| c.id != chunk.id);
            store.push((chunk.clone(), embedding.clone()));
        }
        Ok(())
    }

    async fn search(
        &self,
        query: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, DomainError> {
        let store = self
            .chunks
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let mut results: Vec<SearchResult> = store
            .iter()
            .map(|(chunk, embedding)| SearchResult {
                chunk: chunk.clone(),
                score: query.cosine_similarity(embedding),
            })
            .collect();

        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(top_k);
        Ok(results)
    }

    async fn delete_by_document(&self, document_id: Uuid) -> Result<(), DomainError> {
        let mut store = self
            .chunks
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        store.retain(|(chunk, _)| chunk.document_id != document_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_search_orders_by_similarity() {
        let store = InMemoryVectorStore::new();
        let doc_id = Uuid::new_v4();

        store
            .upsert_many(&[
                (DocumentChunk::new(doc_id, "far", 0), Embedding::new(vec![0.0, 1.0])),
                (DocumentChunk::new(doc_id, "near", 1), Embedding::new(vec![1.0, 0.1])),
            ])
            .await
            .unwrap();

        let results = store.search(&Embedding::new(vec![1.0, 0.0]), 1).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].chunk.content, "near");
        assert!(results[0].score > 0.99);
    }

    #[tokio::test]
    async fn test_upsert_replaces_same_chunk() {
        let store = InMemoryVectorStore::new();
        let mut chunk = DocumentChunk::new(Uuid::new_v4(), "v1", 0);

        store.upsert(&chunk, &Embedding::new(vec![1.0])).await.unwrap();
        chunk.content = "v2".to_string();
        store.upsert(&chunk, &Embedding::new(vec![1.0])).await.unwrap();

        assert_eq!(store.len(), 1);
        let results = store.search(&Embedding::new(vec![1.0]), 5).await.unwrap();
        assert_eq!(results[0].chunk.content, "v2");
    }

    #[tokio::test]
    async fn test_delete_by_document() {
        let store = InMemoryVectorStore::new();
        let keep = Uuid::new_v4();
        let removed = Uuid::new_v4();

        store
            .upsert(&DocumentChunk::new(keep, "keep", 0), &Embedding::new(vec![1.0]))
            .await
            .unwrap();
        store
            .upsert(&DocumentChunk::new(removed, "removed", 0), &Embedding::new(vec![1.0]))
            .await
            .unwrap();
        store.delete_by_document(removed).await.unwrap();

        let results = store.search(&Embedding::new(vec![1.0]), 10).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].chunk.document_id, keep);
    }
}
