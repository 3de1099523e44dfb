use async_trait::async_trait;
use rig::client::{CompletionClient, ProviderClient};
use rig::completion::{Chat, Message as RigMessage};
use rig::providers::groq;

use crate::domain::{ports::ChatModel, DomainError, Message, MessageRole};
use crate::infrastructure::config::LlmConfig;

pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";
pub const TEMPERATURE: f64 = 0.5;

/// Groq-hosted chat model reached through rig.
pub struct GroqChatModel {
    client: groq::Client,
    model: String,
}

impl GroqChatModel {
    /// Reads the API key from `GROQ_API_KEY`.
    pub fn from_config(config: &LlmConfig) -> Result<Self, DomainError> {
        if std::env::var(GROQ_API_KEY_ENV).map_or(true, |k| k.trim().is_empty()) {
            return Err(DomainError::configuration(format!(
                "{GROQ_API_KEY_ENV} is not set"
            )));
        }

        Ok(Self {
            client: groq::Client::from_env(),
            model: config.model.clone(),
        })
    }
}

fn to_rig_message(message: &Message) -> RigMessage {
    match message.role {
        MessageRole::Assistant => RigMessage::assistant(message.content.clone()),
        MessageRole::User | MessageRole::System => RigMessage::user(message.content.clone()),
    }
}

#[async_trait]
impl ChatModel for GroqChatModel {
    async fn chat(
        &self,
        system: &str,
        history: &[Message],
        input: &str,
    ) -> Result<String, DomainError> {
        let agent = self
            .client
            .agent(&self.model)
            .preamble(system)
            .temperature(TEMPERATURE)
            .build();

        let history: Vec<RigMessage> = history.iter().map(to_rig_message).collect();

        agent
            .chat(input.to_string(), history)
            .await
            .map_err(|e| DomainError::external(format!("{} chat failed: {e}", self.model)))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
