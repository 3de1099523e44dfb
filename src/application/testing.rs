//! Test doubles for the domain ports.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::Notify;
use uuid::Uuid;

use crate::domain::{
    ports::{ChatModel, EmbeddingService, Retriever},
    DocumentChunk, DomainError, Embedding, Message, SearchResult,
};

#[derive(Debug, Clone)]
pub struct ChatCall {
    pub system: String,
    pub history: Vec<Message>,
    pub input: String,
}

enum Reply {
    Scripted(Mutex<VecDeque<String>>),
    Echo,
    Fail(String),
}

/// Chat model that records every request and answers from a script.
pub struct ScriptedChatModel {
    reply: Reply,
    calls: Mutex<Vec<ChatCall>>,
}

impl ScriptedChatModel {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_reply(Reply::Scripted(Mutex::new(
            responses.into_iter().map(Into::into).collect(),
        )))
    }

    /// Answers every request with its own input.
    pub fn echo() -> Self {
        Self::with_reply(Reply::Echo)
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_reply(Reply::Fail(message.into()))
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<ChatCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedChatModel {
    async fn chat(
        &self,
        system: &str,
        history: &[Message],
        input: &str,
    ) -> Result<String, DomainError> {
        self.calls.lock().unwrap().push(ChatCall {
            system: system.to_string(),
            history: history.to_vec(),
            input: input.to_string(),
        });

        match &self.reply {
            Reply::Scripted(queue) => queue
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| DomainError::internal("script exhausted")),
            Reply::Echo => Ok(input.to_string()),
            Reply::Fail(message) => Err(DomainError::external(message.clone())),
        }
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Chat model that blocks inside `chat` until the test releases it.
pub struct GatedChatModel {
    answer: String,
    called: Notify,
    gate: Notify,
}

impl GatedChatModel {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            called: Notify::new(),
            gate: Notify::new(),
        }
    }

    pub async fn wait_until_called(&self) {
        self.called.notified().await;
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl ChatModel for GatedChatModel {
    async fn chat(
        &self,
        _system: &str,
        _history: &[Message],
        _input: &str,
    ) -> Result<String, DomainError> {
        self.called.notify_one();
        self.gate.notified().await;
        Ok(self.answer.clone())
    }

    fn model_name(&self) -> &str {
        "gated"
    }
}

/// Returns a fixed list of documents and records the queries it receives.
pub struct RecordingRetriever {
    texts: Vec<String>,
    queries: Mutex<Vec<String>>,
}

impl RecordingRetriever {
    pub fn new(texts: Vec<&str>) -> Self {
        Self {
            texts: texts.into_iter().map(String::from).collect(),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Retriever for RecordingRetriever {
    async fn retrieve(&self, query: &str) -> Result<Vec<SearchResult>, DomainError> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self.texts.iter().map(|t| search_result(t)).collect())
    }
}

/// Stands in for a vector store that cannot serve queries.
pub struct FailingRetriever;

#[async_trait]
impl Retriever for FailingRetriever {
    async fn retrieve(&self, _query: &str) -> Result<Vec<SearchResult>, DomainError> {
        Err(DomainError::external("vector store unavailable"))
    }
}

/// Embeds text as keyword occurrence counts, one dimension per keyword.
pub struct KeywordEmbedding {
    keywords: Vec<String>,
}

impl KeywordEmbedding {
    pub fn new(keywords: &[&str]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    fn vectorize(&self, text: &str) -> Embedding {
        let text = text.to_lowercase();
        Embedding::new(
            self.keywords
                .iter()
                .map(|k| text.matches(k.as_str()).count() as f32)
                .collect(),
        )
    }
}

#[async_trait]
impl EmbeddingService for KeywordEmbedding {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        Ok(self.vectorize(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    fn dimension(&self) -> usize {
        self.keywords.len()
    }
}

pub fn search_result(text: &str) -> SearchResult {
    SearchResult {
        chunk: DocumentChunk::new(Uuid::new_v4(), text, 0),
        score: 1.0,
    }
}
