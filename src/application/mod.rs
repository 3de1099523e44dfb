//! Application layer - Use cases and orchestration.
//!
//! Services and chain steps depend on domain ports (traits) rather than
//! concrete providers, so every step can run against test doubles.

pub mod chain;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

pub use chain::{
    ChainInput, ChainOutput, ChatPromptTemplate, HistoryAwareRetriever, RetrievalChain,
    RunnableWithMessageHistory, SessionConfig, StuffDocumentsChain, DEFAULT_SESSION_ID,
};
pub use services::{DocumentService, HistoryStore, SessionHistory, TurnLock, VectorStoreRetriever};
