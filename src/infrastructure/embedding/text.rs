use async_trait::async_trait;
use rig::client::{EmbeddingsClient, ProviderClient};
use rig::embeddings::EmbeddingsBuilder;
use rig::providers::openai;

use crate::domain::{ports::EmbeddingService, DomainError, Embedding};
use crate::infrastructure::config::EmbeddingConfig;

pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// OpenAI text embeddings reached through rig.
pub struct TextEmbedding {
    client: openai::Client,
    model: String,
    dimension: usize,
}

impl TextEmbedding {
    /// Reads the API key from `OPENAI_API_KEY`.
    pub fn from_config(config: &EmbeddingConfig) -> Result<Self, DomainError> {
        if std::env::var(OPENAI_API_KEY_ENV).map_or(true, |k| k.trim().is_empty()) {
            return Err(DomainError::configuration(format!(
                "{OPENAI_API_KEY_ENV} is not set"
            )));
        }

        Ok(Self {
            client: openai::Client::from_env(),
            model: config.model.clone(),
            dimension: config.dimension,
        })
    }
}

fn to_embedding(emb: rig::embeddings::Embedding) -> Embedding {
    Embedding::new(emb.vec.into_iter().map(|x| x as f32).collect())
}

#[async_trait]
impl EmbeddingService for TextEmbedding {
    async fn embed(&self, text: &str) -> Result<Embedding, DomainError> {
        self.embed_batch(&[text])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::external("No embedding returned"))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, DomainError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let model = self.client.embedding_model(&self.model);
        let mut builder = EmbeddingsBuilder::new(model);
        for text in texts {
            builder = builder
                .document(text.to_string())
                .map_err(|e| DomainError::external(e.to_string()))?;
        }

        let embeddings = builder
            .build()
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        Ok(embeddings
            .into_iter()
            .map(|(_doc, emb)| to_embedding(emb.first()))
            .collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}
