use crate::domain::{errors::DomainError, SearchResult};
use async_trait::async_trait;

/// Returns the documents most relevant to a free-text query, best first.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve(&self, query: &str) -> Result<Vec<SearchResult>, DomainError>;
}
