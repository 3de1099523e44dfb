use std::sync::Arc;
use tracing::instrument;

use crate::application::chain::{prompt::CONTEXT_SLOT, ChatPromptTemplate};
use crate::domain::{ports::ChatModel, DomainError, Message, SearchResult};

pub const DOCUMENT_SEPARATOR: &str = "\n\n";

/// Answers from retrieved documents by placing all of them, verbatim, into
/// the prompt's `{context}` slot. Nothing is truncated; a prompt too large
/// for the model fails in the model call.
pub struct StuffDocumentsChain {
    model: Arc<dyn ChatModel>,
    prompt: ChatPromptTemplate,
}

impl StuffDocumentsChain {
    pub fn new(model: Arc<dyn ChatModel>, prompt: ChatPromptTemplate) -> Result<Self, DomainError> {
        if !prompt.has_slot(CONTEXT_SLOT) {
            return Err(DomainError::validation(format!(
                "prompt must contain a {CONTEXT_SLOT} slot for the retrieved documents"
            )));
        }
        Ok(Self { model, prompt })
    }

    pub fn format_documents(documents: &[SearchResult]) -> String {
        documents
            .iter()
            .map(SearchResult::page_content)
            .collect::<Vec<_>>()
            .join(DOCUMENT_SEPARATOR)
    }

    #[instrument(skip_all, fields(documents = documents.len(), history = chat_history.len()))]
    pub async fn invoke(
        &self,
        input: &str,
        chat_history: &[Message],
        documents: &[SearchResult],
    ) -> Result<String, DomainError> {
        let context = Self::format_documents(documents);
        self.model
            .chat(
                &self.prompt.format_system(&context),
                chat_history,
                &self.prompt.format_human(input, &context),
            )
            .await
    }
}
