use std::sync::Arc;

use crate::application::{DocumentService, RunnableWithMessageHistory, VectorStoreRetriever};
use crate::infrastructure::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub chain: Arc<RunnableWithMessageHistory>,
    pub retriever: Arc<VectorStoreRetriever>,
    pub document_service: Arc<DocumentService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        chain: RunnableWithMessageHistory,
        retriever: Arc<VectorStoreRetriever>,
        config: AppConfig,
    ) -> Self {
        let document_service = Arc::new(
            DocumentService::new(retriever.clone()).with_chunk_size(config.config.rag.chunk_size),
        );
        Self {
            chain: Arc::new(chain),
            retriever,
            document_service,
            config: Arc::new(config),
        }
    }
}
