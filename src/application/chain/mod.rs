//! Composition of the conversational retrieval chain.

mod history_aware;
mod message_history;
pub mod prompt;
mod retrieval;
mod stuff;

pub use history_aware::HistoryAwareRetriever;
pub use message_history::{RunnableWithMessageHistory, SessionConfig, DEFAULT_SESSION_ID};
pub use prompt::ChatPromptTemplate;
pub use retrieval::{ChainInput, ChainOutput, RetrievalChain};
pub use stuff::{StuffDocumentsChain, DOCUMENT_SEPARATOR};
