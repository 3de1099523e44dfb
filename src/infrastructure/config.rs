use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::domain::DomainError;

pub const CONTEXTUALIZE_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
pub const QA_SYSTEM_PROMPT: &str = "Answer using the provided context.";

/// Path of an optional YAML file layered over the defaults.
pub const CONFIG_PATH_ENV: &str = "RAG_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub config: Config,
    pub prompts: PromptsConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub llm: LlmConfig,
    pub embedding: EmbeddingConfig,
    pub rag: RagConfig,
    pub vector_store: VectorStoreConfig,
    pub server: ServerConfig,
    pub cors: CorsConfig,
}

/// The chat model always runs on Groq; only the model id is configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LlmConfig {
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "llama-3.1-8b-instant".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub model: String,
    pub dimension: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "text-embedding-3-small".to_string(),
            dimension: 1536,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    pub top_k: usize,
    pub chunk_size: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            top_k: 4,
            chunk_size: 1000,
        }
    }
}

/// Qdrant is used when `qdrant_url` is set, otherwise an in-process store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorStoreConfig {
    pub qdrant_url: Option<String>,
    pub collection: String,
}

impl Default for VectorStoreConfig {
    fn default() -> Self {
        Self {
            qdrant_url: None,
            collection: "knowledge_base".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptsConfig {
    /// System prompt for rewriting a follow-up into a standalone query.
    pub contextualize: String,
    /// System prompt for answering; must contain `{context}`.
    pub qa: String,
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            contextualize: CONTEXTUALIZE_SYSTEM_PROMPT.to_string(),
            qa: format!("{QA_SYSTEM_PROMPT}\n\n{{context}}"),
        }
    }
}

impl AppConfig {
    /// Defaults, then the YAML file named by `RAG_CONFIG` if any, then
    /// environment overrides.
    pub fn load() -> Result<Self, DomainError> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_yaml_file(path)?,
            Err(_) => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::configuration(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, DomainError> {
        serde_yaml::from_str(content).map_err(|e| DomainError::configuration(e.to_string()))
    }

    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cfg = &mut self.config;
        if let Some(model) = lookup("RAG_MODEL") {
            cfg.llm.model = model;
        }
        if let Some(v) = lookup("RAG_TOP_K") {
            cfg.rag.top_k = parse_var("RAG_TOP_K", &v)?;
        }
        if let Some(model) = lookup("EMBEDDING_MODEL") {
            cfg.embedding.model = model;
        }
        if let Some(v) = lookup("EMBEDDING_DIMENSION") {
            cfg.embedding.dimension = parse_var("EMBEDDING_DIMENSION", &v)?;
        }
        if let Some(url) = lookup("QDRANT_URL") {
            cfg.vector_store.qdrant_url = Some(url);
        }
        if let Some(collection) = lookup("QDRANT_COLLECTION") {
            cfg.vector_store.collection = collection;
        }
        if let Some(host) = lookup("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(v) = lookup("SERVER_PORT") {
            cfg.server.port = parse_var("SERVER_PORT", &v)?;
        }
        Ok(())
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T, DomainError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| DomainError::configuration(format!("invalid {key} {value:?}: {e}")))
}
