use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Append-only message log for one chat session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessageHistory {
    pub session_id: String,
    messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatMessageHistory {
    pub fn new(session_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            session_id: session_id.into(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
        self.updated_at = Utc::now();
    }

    pub fn add_user_message(&mut self, content: impl Into<String>) {
        self.add_message(Message::new(MessageRole::User, content));
    }

    pub fn add_ai_message(&mut self, content: impl Into<String>) {
        self.add_message(Message::new(MessageRole::Assistant, content));
    }

    /// Records one exchange: the user's input followed by the answer.
    pub fn add_turn(&mut self, input: impl Into<String>, answer: impl Into<String>) {
        self.add_user_message(input);
        self.add_ai_message(answer);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of completed user/assistant exchanges.
    pub fn turn_count(&self) -> usize {
        self.messages
            .windows(2)
            .filter(|w| w[0].role == MessageRole::User && w[1].role == MessageRole::Assistant)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "System",
            Self::User => "User",
            Self::Assistant => "Assistant",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_turn_appends_pair() {
        let mut history = ChatMessageHistory::new("u1");
        assert!(history.is_empty());

        history.add_turn("What is the return policy?", "30 days.");

        assert_eq!(history.len(), 2);
        assert_eq!(history.turn_count(), 1);
        assert_eq!(history.messages()[0], Message::user("What is the return policy?"));
        assert_eq!(history.messages()[1], Message::assistant("30 days."));
    }

    #[test]
    fn test_turn_count_ignores_dangling_user_message() {
        let mut history = ChatMessageHistory::new("u1");
        history.add_turn("hi", "hello");
        history.add_user_message("still there?");

        assert_eq!(history.turn_count(), 1);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::assistant("ok")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"ok"}"#);
    }
}
