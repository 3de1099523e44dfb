use crate::domain::{errors::DomainError, Message};
use async_trait::async_trait;

/// A chat-completion model bound to a provider, model id and sampling settings.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Sends `system`, the prior `history` and the new `input` as one chat request.
    async fn chat(
        &self,
        system: &str,
        history: &[Message],
        input: &str,
    ) -> Result<String, DomainError>;

    fn model_name(&self) -> &str;
}
