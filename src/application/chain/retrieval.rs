use serde::Serialize;
use tracing::instrument;

use crate::application::chain::{HistoryAwareRetriever, StuffDocumentsChain};
use crate::domain::{DomainError, Message, SearchResult};

#[derive(Debug, Clone, Serialize)]
pub struct ChainInput {
    pub input: String,
    pub chat_history: Vec<Message>,
}

impl ChainInput {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            chat_history: Vec::new(),
        }
    }

    pub fn with_history(mut self, chat_history: Vec<Message>) -> Self {
        self.chat_history = chat_history;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChainOutput {
    pub input: String,
    pub chat_history: Vec<Message>,
    pub context: Vec<SearchResult>,
    pub answer: String,
}

/// Feeds the documents found by a [`HistoryAwareRetriever`] into a
/// [`StuffDocumentsChain`].
pub struct RetrievalChain {
    retriever: HistoryAwareRetriever,
    combine_documents: StuffDocumentsChain,
}

impl RetrievalChain {
    pub fn new(retriever: HistoryAwareRetriever, combine_documents: StuffDocumentsChain) -> Self {
        Self {
            retriever,
            combine_documents,
        }
    }

    #[instrument(skip_all)]
    pub async fn invoke(&self, request: ChainInput) -> Result<ChainOutput, DomainError> {
        let context = self
            .retriever
            .invoke(&request.input, &request.chat_history)
            .await?;
        let answer = self
            .combine_documents
            .invoke(&request.input, &request.chat_history, &context)
            .await?;

        Ok(ChainOutput {
            input: request.input,
            chat_history: request.chat_history,
            context,
            answer,
        })
    }
}
