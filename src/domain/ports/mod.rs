mod embedding;
mod llm;
mod retriever;
mod vector_store;

pub use embedding::EmbeddingService;
pub use llm::ChatModel;
pub use retriever::Retriever;
pub use vector_store::VectorStore;
