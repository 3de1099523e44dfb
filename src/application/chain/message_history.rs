use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;

use crate::application::chain::{ChainInput, ChainOutput, RetrievalChain};
use crate::application::services::{HistoryStore, SessionHistory};
use crate::domain::DomainError;

pub const DEFAULT_SESSION_ID: &str = "user-session";

/// Per-call configuration selecting the conversation to continue.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub session_id: String,
}

impl SessionConfig {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_ID)
    }
}

/// Wraps a [`RetrievalChain`] with session memory: each call reads the
/// session's history into `chat_history` and appends the new
/// input/answer turn once the chain succeeds.
///
/// The session's turn lock is held for the whole call, so calls for one
/// session run one at a time while different sessions proceed independently.
/// The history itself is locked only to snapshot it and to append the turn,
/// so readers never wait on the model.
pub struct RunnableWithMessageHistory {
    chain: RetrievalChain,
    histories: Arc<HistoryStore>,
}

impl RunnableWithMessageHistory {
    pub fn new(chain: RetrievalChain, histories: Arc<HistoryStore>) -> Self {
        Self { chain, histories }
    }

    pub fn get_history(&self, session_id: &str) -> SessionHistory {
        self.histories.get_history(session_id)
    }

    pub fn histories(&self) -> &Arc<HistoryStore> {
        &self.histories
    }

    #[instrument(skip(self, input, config), fields(session_id = %config.session_id))]
    pub async fn invoke(
        &self,
        input: &str,
        config: &SessionConfig,
    ) -> Result<ChainOutput, DomainError> {
        if config.session_id.trim().is_empty() {
            return Err(DomainError::validation("session_id must not be empty"));
        }

        let (history, turn) = self.histories.get_session(&config.session_id);
        let _turn = turn.lock().await;

        let chat_history = history.lock().await.messages().to_vec();
        let output = self.chain.invoke(ChainInput::new(input).with_history(chat_history)).await?;

        let mut log = history.lock().await;
        log.add_turn(input, output.answer.as_str());
        tracing::info!(
            turns = log.turn_count(),
            documents = output.context.len(),
            "turn recorded"
        );

        Ok(output)
    }
}
