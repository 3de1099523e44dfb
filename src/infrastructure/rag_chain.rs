use std::sync::Arc;

use crate::application::{
    ChatPromptTemplate, HistoryAwareRetriever, HistoryStore, RetrievalChain,
    RunnableWithMessageHistory, SessionHistory, StuffDocumentsChain, VectorStoreRetriever,
};
use crate::domain::{
    ports::{ChatModel, Retriever, VectorStore},
    DomainError,
};
use crate::infrastructure::config::{AppConfig, Config, PromptsConfig};
use crate::infrastructure::embedding::TextEmbedding;
use crate::infrastructure::llm::{GroqChatModel, TEMPERATURE};
use crate::infrastructure::vector_store::{InMemoryVectorStore, QdrantVectorStore};

/// Assembles the conversational RAG chain around a vector store.
///
/// The builder owns the session history store; every chain it builds reads
/// and writes the same histories.
pub struct RagChainBuilder {
    vector_store: Arc<dyn Retriever>,
    model: Arc<dyn ChatModel>,
    prompts: PromptsConfig,
    history_store: Arc<HistoryStore>,
}

impl RagChainBuilder {
    /// Binds the Groq chat model named in the configuration. The vector
    /// store is not touched until a chain runs.
    pub fn new(
        vector_store: Arc<dyn Retriever>,
        config: &AppConfig,
    ) -> Result<Self, DomainError> {
        let model = GroqChatModel::from_config(&config.config.llm)?;
        tracing::info!(
            model = %config.config.llm.model,
            temperature = TEMPERATURE,
            "chat model configured"
        );

        Ok(Self::with_model(vector_store, Arc::new(model)).with_prompts(config.prompts.clone()))
    }

    pub fn with_model(vector_store: Arc<dyn Retriever>, model: Arc<dyn ChatModel>) -> Self {
        Self {
            vector_store,
            model,
            prompts: PromptsConfig::default(),
            history_store: Arc::new(HistoryStore::new()),
        }
    }

    pub fn with_prompts(mut self, prompts: PromptsConfig) -> Self {
        self.prompts = prompts;
        self
    }

    pub fn model(&self) -> &Arc<dyn ChatModel> {
        &self.model
    }

    pub fn history_store(&self) -> &Arc<HistoryStore> {
        &self.history_store
    }

    /// Returns the session's history, creating an empty one on first use.
    pub fn get_history(&self, session_id: &str) -> SessionHistory {
        self.history_store.get_history(session_id)
    }

    /// Composes retriever, history-aware rewriting, document stuffing and
    /// session memory into one chain. Fails only if the answer prompt has no
    /// `{context}` slot.
    pub fn build_chain(&self) -> Result<RunnableWithMessageHistory, DomainError> {
        let retriever = self.vector_store.clone();

        let history_aware_retriever = HistoryAwareRetriever::new(
            self.model.clone(),
            retriever,
            ChatPromptTemplate::new(self.prompts.contextualize.as_str()),
        );

        let doc_chain = StuffDocumentsChain::new(
            self.model.clone(),
            ChatPromptTemplate::new(self.prompts.qa.as_str()),
        )?;

        let rag_chain = RetrievalChain::new(history_aware_retriever, doc_chain);

        Ok(RunnableWithMessageHistory::new(
            rag_chain,
            self.history_store.clone(),
        ))
    }
}

/// Connects to Qdrant when a URL is configured, otherwise keeps vectors in
/// memory.
pub async fn vector_store_from_config(
    config: &Config,
) -> Result<Arc<dyn VectorStore>, DomainError> {
    match &config.vector_store.qdrant_url {
        Some(url) => {
            let store = QdrantVectorStore::new(
                url,
                &config.vector_store.collection,
                config.embedding.dimension,
            )
            .await?;
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("QDRANT_URL not set, using in-memory vector store");
            Ok(Arc::new(InMemoryVectorStore::new()))
        }
    }
}

/// The retrieval capability for the configured vector store and embedding
/// model.
pub async fn retriever_from_config(
    config: &Config,
) -> Result<Arc<VectorStoreRetriever>, DomainError> {
    let embedding = Arc::new(TextEmbedding::from_config(&config.embedding)?);
    let vector_store = vector_store_from_config(config).await?;
    Ok(Arc::new(VectorStoreRetriever::new(
        embedding,
        vector_store,
        config.rag.top_k,
    )))
}
