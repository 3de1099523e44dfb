mod document;
mod history;
mod retriever;

pub use document::{DocumentService, DEFAULT_CHUNK_SIZE};
pub use history::{HistoryStore, SessionHistory, TurnLock};
pub use retriever::VectorStoreRetriever;
