mod groq;

pub use groq::{GroqChatModel, GROQ_API_KEY_ENV, TEMPERATURE};
