use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Mutex;

use crate::domain::ChatMessageHistory;

/// Shared handle to one session's log. Every caller asking for the same
/// session id gets a clone of the same `Arc`.
pub type SessionHistory = Arc<Mutex<ChatMessageHistory>>;

/// Held for a whole chain invocation; the log itself is only locked to
/// snapshot and to append.
pub type TurnLock = Arc<Mutex<()>>;

#[derive(Clone)]
struct Session {
    history: SessionHistory,
    turn: TurnLock,
}

impl Session {
    fn new(session_id: &str) -> Self {
        Self {
            history: Arc::new(Mutex::new(ChatMessageHistory::new(session_id))),
            turn: Arc::new(Mutex::new(())),
        }
    }
}

/// In-memory map of session id to history. Sessions are created on first
/// access and live as long as the store.
#[derive(Default)]
pub struct HistoryStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the history for `session_id`, creating an empty one on first use.
    pub fn get_history(&self, session_id: &str) -> SessionHistory {
        self.session(session_id).history
    }

    /// History and turn lock for `session_id`, created together on first use.
    pub fn get_session(&self, session_id: &str) -> (SessionHistory, TurnLock) {
        let session = self.session(session_id);
        (session.history, session.turn)
    }

    /// Looks up an existing session without creating it.
    pub fn find(&self, session_id: &str) -> Option<SessionHistory> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(session_id)
            .map(|session| session.history.clone())
    }

    fn session(&self, session_id: &str) -> Session {
        if let Some(session) = self
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(session_id)
        {
            return session.clone();
        }

        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                tracing::debug!(session_id, "created session history");
                Session::new(session_id)
            })
            .clone()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
