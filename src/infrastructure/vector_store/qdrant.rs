use async_trait::async_trait;
use qdrant_client::qdrant::point_id::PointIdOptions;
use qdrant_client::qdrant::{
    Condition, CreateCollectionBuilder, DeletePointsBuilder, Distance, Filter, PointStruct,
    SearchPointsBuilder, UpsertPointsBuilder, VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant};
use uuid::Uuid;

use crate::domain::{
    ports::VectorStore, ChunkMetadata, DocumentChunk, DomainError, Embedding, SearchResult,
};

/// Chunks stored as points of one Qdrant collection; the chunk id is the
/// point id and the chunk fields travel in the payload.
pub struct QdrantVectorStore {
    client: Qdrant,
    collection: String,
    dimension: usize,
}

impl QdrantVectorStore {
    /// Connects and creates the collection (cosine distance) if it is missing.
    pub async fn new(url: &str, collection: &str, dimension: usize) -> Result<Self, DomainError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| DomainError::external(e.to_string()))?;

        let store = Self {
            client,
            collection: collection.to_string(),
            dimension,
        };

        store.ensure_collection().await?;
        tracing::info!(url, collection, dimension, "qdrant collection ready");

        Ok(store)
    }

    async fn ensure_collection(&self) -> Result<(), DomainError> {
        let exists = self
            .client
            .collection_exists(&self.collection)
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        if !exists {
            self.client
                .create_collection(
                    CreateCollectionBuilder::new(&self.collection).vectors_config(
                        VectorParamsBuilder::new(self.dimension as u64, Distance::Cosine),
                    ),
                )
                .await
                .map_err(|e| DomainError::external(e.to_string()))?;
        }

        Ok(())
    }

    fn to_point(
        &self,
        chunk: &DocumentChunk,
        embedding: &Embedding,
    ) -> Result<PointStruct, DomainError> {
        if embedding.dimension() != self.dimension {
            return Err(DomainError::validation(format!(
                "embedding has {} dimensions, collection expects {}",
                embedding.dimension(),
                self.dimension
            )));
        }

        let payload: Payload = serde_json::json!({
            "document_id": chunk.document_id.to_string(),
            "content": chunk.content,
            "chunk_index": chunk.chunk_index,
            "source": chunk.metadata.source,
        })
        .try_into()
        .map_err(|_| DomainError::internal("Failed to create payload"))?;

        Ok(PointStruct::new(
            chunk.id.to_string(),
            embedding.as_slice().to_vec(),
            payload,
        ))
    }
}

#[async_trait]
impl VectorStore for QdrantVectorStore {
    async fn upsert(&self, chunk: &DocumentChunk, embedding: &Embedding) -> Result<(), DomainError> {
        self.upsert_many(&[(chunk.clone(), embedding.clone())]).await
    }

    async fn upsert_many(
        &self,
        items: &[(DocumentChunk, Embedding)],
    ) -> Result<(), DomainError> {
        if items.is_empty() {
            return Ok(());
        }

        let points = items
            .iter()
            .map(|(chunk, embedding)| self.to_point(chunk, embedding))
            .collect::<Result<Vec<_>, _>>()?;

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, points).wait(true))
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        Ok(())
    }

    async fn search(&self, query: &Embedding, top_k: usize) -> Result<Vec<SearchResult>, DomainError> {
        let results = self
            .client
            .search_points(
                SearchPointsBuilder::new(&self.collection, query.as_slice().to_vec(), top_k as u64)
                    .with_payload(true),
            )
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        let search_results = results
            .result
            .into_iter()
            .filter_map(|point| {
                let chunk_id: Uuid = match point.id?.point_id_options? {
                    PointIdOptions::Uuid(s) => s.parse().ok()?,
                    PointIdOptions::Num(_) => return None,
                };
                let payload = point.payload;

                let document_id: Uuid = payload.get("document_id")?.as_str()?.parse().ok()?;
                let content = payload.get("content")?.as_str()?.to_string();
                let chunk_index = payload.get("chunk_index")?.as_integer()? as usize;
                let source = payload
                    .get("source")
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_string());

                let chunk = DocumentChunk {
                    id: chunk_id,
                    document_id,
                    content,
                    chunk_index,
                    metadata: ChunkMetadata { source },
                };

                Some(SearchResult {
                    chunk,
                    score: point.score,
                })
            })
            .collect();

        Ok(search_results)
    }

    async fn delete_by_document(&self, document_id: Uuid) -> Result<(), DomainError> {
        let filter = Filter::must([Condition::matches(
            "document_id",
            document_id.to_string(),
        )]);

        self.client
            .delete_points(DeletePointsBuilder::new(&self.collection).points(filter))
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        Ok(())
    }
}
