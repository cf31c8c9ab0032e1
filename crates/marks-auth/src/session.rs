//! In-memory session store: token -> teacher id.
//!
//! Lives for the process lifetime. Constructed once and shared through
//! [`crate::Authenticator`]; nothing is persisted.

use std::collections::HashMap;

use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, i64>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a token unless it is already in use. Returns whether it was inserted.
    pub async fn insert_new(&self, token: &str, teacher_id: i64) -> bool {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(token) {
            return false;
        }
        sessions.insert(token.to_string(), teacher_id);
        true
    }

    pub async fn get(&self, token: &str) -> Option<i64> {
        self.sessions.read().await.get(token).copied()
    }

    /// Remove a token. Absent tokens are ignored.
    pub async fn remove(&self, token: &str) -> Option<i64> {
        self.sessions.write().await.remove(token)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
