mod text;

pub use text::{TextEmbedding, OPENAI_API_KEY_ENV};
