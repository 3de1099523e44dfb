//! Conversational retrieval-augmented generation.
//!
//! A [`RagChainBuilder`](infrastructure::RagChainBuilder) wires a vector store
//! and a chat model into a chain that rewrites follow-up questions with the
//! session's history, retrieves context and answers from it, recording every
//! turn in a per-session history log.

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
