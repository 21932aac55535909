use std::collections::HashMap;
use std::sync::Arc;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// A login held server-side, addressed by the opaque id in the session cookie.
#[derive(Debug, Clone)]
pub struct SessionCredential {
    pub session_id: String,
    pub username: String,
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionCredential {
    pub fn new(
        username: String,
        token: String,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            username,
            token,
            issued_at,
            expires_at,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionCredential>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the session, pruning any that have already expired.
    pub async fn insert(&self, session: SessionCredential) {
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired());
        let removed = before - sessions.len();
        if removed > 0 {
            debug!("Pruned {} expired sessions", removed);
        }

        info!("Created session {} for user {}", session.session_id, session.username);
        sessions.insert(session.session_id.clone(), session);
    }

    pub async fn get(&self, session_id: &str) -> Option<SessionCredential> {
        self.sessions.read().await.get(session_id).cloned()
    }

    pub async fn remove(&self, session_id: &str) -> Option<SessionCredential> {
        let removed = self.sessions.write().await.remove(session_id);
        if removed.is_some() {
            info!("Invalidated session: {}", session_id);
        }
        removed
    }

    pub async fn active_session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
