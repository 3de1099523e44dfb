use std::sync::Arc;
use tracing::instrument;

use crate::application::chain::ChatPromptTemplate;
use crate::domain::{
    ports::{ChatModel, Retriever},
    DomainError, Message, SearchResult,
};

/// Turns a follow-up question into a standalone search query using the chat
/// history, then retrieves documents for it.
pub struct HistoryAwareRetriever {
    model: Arc<dyn ChatModel>,
    retriever: Arc<dyn Retriever>,
    prompt: ChatPromptTemplate,
}

impl HistoryAwareRetriever {
    pub fn new(
        model: Arc<dyn ChatModel>,
        retriever: Arc<dyn Retriever>,
        prompt: ChatPromptTemplate,
    ) -> Self {
        Self {
            model,
            retriever,
            prompt,
        }
    }

    /// Without history the input is already standalone and goes to the
    /// retriever as-is.
    pub async fn rewrite_query(
        &self,
        input: &str,
        chat_history: &[Message],
    ) -> Result<String, DomainError> {
        if chat_history.is_empty() {
            return Ok(input.to_string());
        }

        let rewritten = self
            .model
            .chat(
                &self.prompt.format_system(""),
                chat_history,
                &self.prompt.format_human(input, ""),
            )
            .await?;
        Ok(rewritten.trim().to_string())
    }

    #[instrument(skip_all, fields(history = chat_history.len()))]
    pub async fn invoke(
        &self,
        input: &str,
        chat_history: &[Message],
    ) -> Result<Vec<SearchResult>, DomainError> {
        let query = self.rewrite_query(input, chat_history).await?;
        tracing::debug!(%query, "retrieving");

        let documents = self.retriever.retrieve(&query).await?;
        tracing::debug!(documents = documents.len(), "retrieved");
        Ok(documents)
    }
}
