mod conversation;
mod document;
mod embedding;

pub use conversation::{ChatMessageHistory, Message, MessageRole};
pub use document::{chunk_content, ChunkMetadata, Document, DocumentChunk, SearchResult};
pub use embedding::Embedding;
