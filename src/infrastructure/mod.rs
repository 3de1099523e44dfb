pub mod config;
pub mod embedding;
pub mod llm;
pub mod rag_chain;
pub mod vector_store;

pub use config::{AppConfig, Config, PromptsConfig};
pub use embedding::TextEmbedding;
pub use llm::GroqChatModel;
pub use rag_chain::{retriever_from_config, vector_store_from_config, RagChainBuilder};
pub use vector_store::{InMemoryVectorStore, QdrantVectorStore};
